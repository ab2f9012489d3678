//! Log engine setup and initialization
//!
//! Configuring the engine is an explicit step, separate from building
//! adapters:
//! - Load configuration from a source
//! - Build and install the process-wide subscriber
//! - Optionally watch the configuration file for changes
//! - Hand out adapters bound to named engine loggers

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::EngineAdapter;
use crate::domain::models::EngineConfig;
use crate::domain::ports::{ConfigSource, LogEngineProvider};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{
    build_subscriber, install, BuiltSubscriber, ConfigWatcher, FilterReloader, TracingEngine,
};

/// Keeps the configured engine running
///
/// Holds the file writer worker and the config watcher. Dropping the
/// guard flushes pending file output and stops watching; the installed
/// subscriber itself stays in place for the rest of the process.
pub struct EngineGuard {
    reloader: Arc<FilterReloader>,
    watcher: Option<ConfigWatcher>,
    _worker: Option<WorkerGuard>,
}

impl EngineGuard {
    /// Repository of named engine loggers
    pub fn engine(&self) -> &'static TracingEngine {
        TracingEngine::global()
    }

    /// Adapter bound to the logger named `name`
    pub fn adapter(&self, name: &str) -> EngineAdapter {
        EngineAdapter::from_provider(self.engine(), name)
    }

    /// Adapter bound to the logger associated with type `T`
    pub fn adapter_for<T: ?Sized>(&self) -> EngineAdapter {
        EngineAdapter::new(self.engine().logger_for::<T>())
    }

    /// Configuration currently applied to the engine
    pub fn config(&self) -> EngineConfig {
        self.reloader.current()
    }

    /// Apply a new filter configuration to the running engine
    pub fn reload(&self, config: EngineConfig) -> Result<()> {
        ConfigLoader::validate(&config)?;
        self.reloader.apply(config)
    }

    /// Returns true when a config file is being watched
    pub const fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }
}

impl std::fmt::Debug for EngineGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineGuard")
            .field("config", &self.config())
            .field("watcher", &self.watcher)
            .finish_non_exhaustive()
    }
}

/// Load configuration from `source` and install the engine
///
/// With `watch` set and a file-backed source, later edits to the file
/// are applied to the running engine's filter.
///
/// # Errors
///
/// Fails when the source cannot be loaded or validated, or when a global
/// subscriber is already installed in this process.
///
/// # Example
///
/// ```no_run
/// use logbridge::infrastructure::config::FileSource;
/// use logbridge::infrastructure::setup::configure;
/// use logbridge::domain::models::LogMessage;
/// use logbridge::domain::ports::Logger;
///
/// # async fn example() -> anyhow::Result<()> {
/// struct Billing;
///
/// let guard = configure(&FileSource::new("logbridge.yaml"), true).await?;
/// let logger = guard.adapter_for::<Billing>();
/// logger.log(&LogMessage::info("invoice {0} sent").with_value(1042))?;
/// # Ok(())
/// # }
/// ```
pub async fn configure(source: &dyn ConfigSource, watch: bool) -> Result<EngineGuard> {
    let config = source
        .load()
        .await
        .with_context(|| format!("Failed to load log engine configuration from {}", source.describe()))?;

    let watch_path = if watch {
        let path = source.watch_path();
        if path.is_none() {
            warn!(
                source = %source.describe(),
                "watch requested for a source without a local file; changes will not be applied"
            );
        }
        path
    } else {
        None
    };

    start(config, watch_path)
}

/// Install the engine from an already loaded configuration
pub fn configure_with(config: EngineConfig) -> Result<EngineGuard> {
    ConfigLoader::validate(&config)?;
    start(config, None)
}

/// Adapter for type `T` using the engine as currently configured
///
/// Does not configure anything; records go to whatever subscriber is
/// installed, if any.
pub fn adapter_for<T: ?Sized>() -> EngineAdapter {
    EngineAdapter::new(TracingEngine::global().logger_for::<T>())
}

fn start(config: EngineConfig, watch_path: Option<&Path>) -> Result<EngineGuard> {
    let BuiltSubscriber {
        subscriber,
        filter,
        guard,
    } = build_subscriber(&config)?;

    let reloader = Arc::new(FilterReloader::new(filter, config.clone()));
    let watcher = watch_path
        .map(|path| ConfigWatcher::spawn(path, Arc::clone(&reloader)))
        .transpose()?;

    install(subscriber)?;

    info!(
        level = %config.level,
        format = ?config.format,
        file_output = config.log_dir.is_some(),
        watching = watcher.is_some(),
        "log engine configured"
    );

    Ok(EngineGuard {
        reloader,
        watcher,
        _worker: guard,
    })
}
