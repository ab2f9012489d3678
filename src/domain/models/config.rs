use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log engine configuration
///
/// Describes the filter and sinks of the tracing engine. Every field has a
/// default, so an empty document yields a usable stdout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for stdout
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling log files (stdout only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File name prefix inside `log_dir`
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Rolling policy for the file sink
    #[serde(default)]
    pub rotation: RotationPolicy,

    /// Enable stdout logging
    #[serde(default = "default_true")]
    pub enable_stdout: bool,

    /// Emit ANSI colors on stdout
    #[serde(default = "default_true")]
    pub ansi: bool,

    /// Extra filter directives, e.g. `logbridge=debug`
    #[serde(default)]
    pub directives: Vec<String>,
}

/// Output format for the stdout sink
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-line human readable output
    #[default]
    Pretty,
    /// Single-line human readable output
    Compact,
}

/// Rolling policy for the file sink
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file every day
    #[default]
    Daily,
    /// New file every hour
    Hourly,
    /// New file every minute
    Minutely,
    /// Single file
    Never,
}

impl EngineConfig {
    /// Returns true when `other` differs only in filter settings
    ///
    /// Filter settings can be swapped on a live engine; sink settings
    /// require a fresh subscriber.
    pub fn same_sinks(&self, other: &Self) -> bool {
        self.format == other.format
            && self.log_dir == other.log_dir
            && self.file_name == other.file_name
            && self.rotation == other.rotation
            && self.enable_stdout == other.enable_stdout
            && self.ansi == other.ansi
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            file_name: default_file_name(),
            rotation: RotationPolicy::default(),
            enable_stdout: true,
            ansi: true,
            directives: Vec::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_name() -> String {
    "logbridge.log".to_string()
}

const fn default_true() -> bool {
    true
}
