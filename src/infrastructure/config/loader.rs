use anyhow::{Context, Result};
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::filter::Directive;

use crate::domain::models::EngineConfig;

/// Prefix for environment variable overrides of file configuration
pub const ENV_PREFIX: &str = "LOGBRIDGE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error, off")]
    InvalidLogLevel(String),

    #[error("Log file name cannot be empty when log_dir is set")]
    EmptyFileName,

    #[error("Invalid filter directive '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Syntax of a configuration document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML (also the fallback for unknown extensions)
    #[default]
    Yaml,
    /// JSON
    Json,
    /// TOML
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a specific file
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The file, parsed by extension (`.json`, `.toml`, otherwise YAML)
    /// 3. Environment variables (`LOGBRIDGE_*` prefix, `__` for nesting)
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<EngineConfig> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Log engine config file not found: {}", path.display());
        }

        let figment = Figment::new().merge(Serialized::defaults(EngineConfig::default()));
        let figment = match DocumentFormat::from_path(path) {
            DocumentFormat::Yaml => figment.merge(Yaml::file(path)),
            DocumentFormat::Json => figment.merge(Json::file(path)),
            DocumentFormat::Toml => figment.merge(Toml::file(path)),
        };

        let config: EngineConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from document text
    pub fn load_from_str(content: &str, format: DocumentFormat) -> Result<EngineConfig> {
        let figment = Figment::new().merge(Serialized::defaults(EngineConfig::default()));
        let figment = match format {
            DocumentFormat::Yaml => figment.merge(Yaml::string(content)),
            DocumentFormat::Json => figment.merge(Json::string(content)),
            DocumentFormat::Toml => figment.merge(Toml::string(content)),
        };

        let config: EngineConfig = figment
            .extract()
            .context("Failed to extract configuration from document")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from an in-memory structured element
    ///
    /// `element` must be a map; its keys override the defaults.
    pub fn load_from_value(element: &Value) -> Result<EngineConfig> {
        if !element.is_object() {
            return Err(ConfigError::ValidationFailed(
                "configuration element must be a map".to_string(),
            )
            .into());
        }

        let config: EngineConfig = Figment::new()
            .merge(Serialized::defaults(EngineConfig::default()))
            .merge(Serialized::defaults(element))
            .extract()
            .context("Failed to extract configuration from element")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_log_levels.contains(&config.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.level.clone()));
        }

        if config.log_dir.is_some() && config.file_name.trim().is_empty() {
            return Err(ConfigError::EmptyFileName);
        }

        for directive in &config.directives {
            if let Err(err) = directive.parse::<Directive>() {
                return Err(ConfigError::InvalidDirective {
                    directive: directive.clone(),
                    reason: err.to_string(),
                });
            }
        }

        Ok(())
    }
}
