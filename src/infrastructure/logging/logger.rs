use anyhow::{Context, Result};
use std::io;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::{reload, EnvFilter, Layer, Registry};

use crate::domain::models::{EngineConfig, LogFormat, RotationPolicy};

/// Registry with the reloadable filter applied
pub type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;

/// Handle used to swap the active filter on a live subscriber
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Subscriber assembled from an [`EngineConfig`]
pub type EngineSubscriber = Layered<Vec<BoxedLayer>, FilteredRegistry>;

/// A constructed, not yet installed, engine subscriber
pub struct BuiltSubscriber {
    /// The subscriber itself
    pub subscriber: EngineSubscriber,
    /// Reload handle for the filter layer
    pub filter: FilterHandle,
    /// Keeps the non-blocking file writer alive; drop flushes it
    pub guard: Option<WorkerGuard>,
}

impl std::fmt::Debug for BuiltSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltSubscriber")
            .field("file_output", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

/// Build the engine subscriber writing human/JSON output to stdout
pub fn build_subscriber(config: &EngineConfig) -> Result<BuiltSubscriber> {
    build_subscriber_with_writer(config, io::stdout)
}

/// Build the engine subscriber with `writer` standing in for stdout
///
/// The file sink, when configured, is unaffected by `writer`.
pub fn build_subscriber_with_writer<W>(config: &EngineConfig, writer: W) -> Result<BuiltSubscriber>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter_layer, filter) = reload::Layer::new(build_filter(config)?);
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let guard = if let Some(ref log_dir) = config.log_dir {
        let file_appender = match config.rotation {
            RotationPolicy::Daily => rolling::daily(log_dir, &config.file_name),
            RotationPolicy::Hourly => rolling::hourly(log_dir, &config.file_name),
            RotationPolicy::Minutely => rolling::minutely(log_dir, &config.file_name),
            RotationPolicy::Never => rolling::never(log_dir, &config.file_name),
        };

        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

        // File layer - always JSON for structured logging
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        );

        Some(guard)
    } else {
        None
    };

    if config.enable_stdout {
        let stdout_layer: BoxedLayer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(writer)
                .with_ansi(config.ansi)
                .with_target(true)
                .with_thread_ids(true)
                .boxed(),
            LogFormat::Compact => tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.ansi)
                .with_target(true)
                .boxed(),
        };
        layers.push(stdout_layer);
    }

    let subscriber = tracing_subscriber::registry()
        .with(filter_layer)
        .with(layers);

    Ok(BuiltSubscriber {
        subscriber,
        filter,
        guard,
    })
}

/// Install `subscriber` as the process-wide default
pub fn install<S>(subscriber: S) -> Result<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::set_global_default(subscriber)
        .context("A global log engine subscriber is already installed")
}

/// Build the filter described by `config`
///
/// `RUST_LOG` directives are honored on top of the configured level, and
/// configured directives are applied last.
pub fn build_filter(config: &EngineConfig) -> Result<EnvFilter> {
    let default_level = parse_log_level(&config.level)?;

    let mut filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    for directive in &config.directives {
        let directive: Directive = directive
            .parse()
            .with_context(|| format!("Invalid filter directive: {directive}"))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

/// Parse log level string to a level filter
pub(crate) fn parse_log_level(level: &str) -> Result<LevelFilter> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}
