//! Tracing-backed log engine.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::Level;

use super::format::render;
use crate::domain::error::EngineError;
use crate::domain::ports::{LogEngine, LogEngineProvider};

/// Target of every event emitted through a [`TracingLog`]
///
/// Filter directives such as `logbridge::engine=warn` apply to all named
/// loggers at once; the logger name travels in the `logger` field.
pub const ENGINE_TARGET: &str = "logbridge::engine";

/// Expands to an enabled-check, a render and a tracing event at a fixed level
macro_rules! emit {
    ($log:expr, $level:expr, $format:expr, $values:expr) => {{
        if !tracing::enabled!(target: ENGINE_TARGET, $level) {
            return Ok(());
        }
        let message = render($format, $values)?;
        let name = &$log.name;
        tracing::event!(target: ENGINE_TARGET, $level, logger = %name, "{}", message);
        Ok(())
    }};
}

/// Named logger emitting `tracing` events
///
/// Renders the composite format and emits one event at the matching
/// level. Rendering is skipped when the level is disabled, so a bad
/// template only fails when its record would actually be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingLog {
    name: String,
}

impl TracingLog {
    /// Create a logger named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl LogEngine for TracingLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn debug_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError> {
        emit!(self, Level::DEBUG, format, values)
    }

    fn info_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError> {
        emit!(self, Level::INFO, format, values)
    }

    fn warn_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError> {
        emit!(self, Level::WARN, format, values)
    }

    fn error_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError> {
        emit!(self, Level::ERROR, format, values)
    }
}

/// Repository of [`TracingLog`] instances keyed by name
///
/// Repeated lookups of the same name return the same instance. Clones
/// share the repository.
#[derive(Debug, Clone, Default)]
pub struct TracingEngine {
    loggers: Arc<RwLock<HashMap<String, Arc<TracingLog>>>>,
}

impl TracingEngine {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide repository
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<TracingEngine> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Number of distinct loggers handed out so far
    pub fn len(&self) -> usize {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when no logger has been acquired yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogEngineProvider for TracingEngine {
    fn logger(&self, name: &str) -> Arc<dyn LogEngine> {
        if let Some(existing) = self
            .loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return existing.clone();
        }

        self.loggers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(TracingLog::new(name)))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::FormatError;
    use crate::infrastructure::logging::capture::CaptureWriter;
    use serde_json::json;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture(level: Level) -> (CaptureWriter, impl tracing::Subscriber + Send + Sync) {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::registry()
            .with(tracing_subscriber::filter::LevelFilter::from_level(level))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer.clone())
                    .with_ansi(false),
            );
        (writer, subscriber)
    }

    #[test]
    fn test_tracing_log_renders_and_emits() {
        let (writer, subscriber) = capture(Level::TRACE);
        let log = TracingLog::new("app::retry");

        tracing::subscriber::with_default(subscriber, || {
            log.warn_format("retrying {0} of {1}", &[json!(1), json!(3)])
                .unwrap();
        });

        let output = writer.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("retrying 1 of 3"), "{output}");
        assert!(output.contains("logger=app::retry"), "{output}");
    }

    #[test]
    fn test_each_method_uses_its_level() {
        let (writer, subscriber) = capture(Level::TRACE);
        let log = TracingLog::new("levels");

        tracing::subscriber::with_default(subscriber, || {
            log.debug_format("d", &[]).unwrap();
            log.info_format("i", &[]).unwrap();
            log.error_format("e", &[]).unwrap();
        });

        let output = writer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3, "{output}");
        assert!(lines[0].contains("DEBUG"));
        assert!(lines[1].contains("INFO"));
        assert!(lines[2].contains("ERROR"));
    }

    #[test]
    fn test_bad_template_fails_when_enabled() {
        let (_writer, subscriber) = capture(Level::TRACE);
        let log = TracingLog::new("bad");

        let result = tracing::subscriber::with_default(subscriber, || {
            log.error_format("{1}", &[json!(0)])
        });

        assert!(matches!(
            result,
            Err(EngineError::Format(FormatError::IndexOutOfRange { index: 1, .. }))
        ));
    }

    #[test]
    fn test_disabled_level_skips_rendering() {
        let (writer, subscriber) = capture(Level::WARN);
        let log = TracingLog::new("quiet");

        let result = tracing::subscriber::with_default(subscriber, || {
            log.debug_format("{9}", &[])
        });

        assert!(result.is_ok());
        assert!(writer.contents().is_empty());
    }

    #[test]
    fn test_engine_caches_loggers_by_name() {
        let engine = TracingEngine::new();
        assert!(engine.is_empty());

        let a = engine.logger("app::db");
        let b = engine.logger("app::db");
        let c = engine.logger("app::net");

        assert_eq!(engine.len(), 2);
        assert_eq!(a.name(), "app::db");
        assert_eq!(c.name(), "app::net");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_logger_for_type() {
        struct Worker;
        let engine = TracingEngine::new();
        let log = engine.logger_for::<Worker>();
        assert!(log.name().ends_with("Worker"));
    }

    #[test]
    fn test_clones_share_repository() {
        let engine = TracingEngine::new();
        let clone = engine.clone();
        let _ = clone.logger("shared");
        assert_eq!(engine.len(), 1);
    }
}
