//! Logger adapter over an external log engine.
//!
//! Translates a severity-tagged [`Message`] into exactly one emission call
//! on a [`LogEngine`], chosen by severity alone. Format and values are
//! forwarded untouched; unmapped severities are dropped.

use serde_json::Value;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::domain::error::{EngineError, LogAsyncError};
use crate::domain::models::{Message, MessageSeverity};
use crate::domain::ports::{LogEngine, LogEngineProvider, LogTask, Logger};

/// Emission path selected for a severity
type EmitFn = fn(&dyn LogEngine, &str, &[Value]) -> Result<(), EngineError>;

/// Severity dispatch table; `None` means the message is discarded
fn route(severity: MessageSeverity) -> Option<EmitFn> {
    match severity {
        MessageSeverity::Debug => Some(|engine, format, values| engine.debug_format(format, values)),
        MessageSeverity::Error => Some(|engine, format, values| engine.error_format(format, values)),
        MessageSeverity::Informational => {
            Some(|engine, format, values| engine.info_format(format, values))
        }
        MessageSeverity::Warning => Some(|engine, format, values| engine.warn_format(format, values)),
        MessageSeverity::Unmapped(_) => None,
    }
}

fn dispatch(engine: &dyn LogEngine, message: &dyn Message) -> Result<(), EngineError> {
    route(message.severity()).map_or(Ok(()), |emit| {
        emit(engine, message.format(), message.values())
    })
}

/// [`Logger`] implementation delegating to a [`LogEngine`]
///
/// Holds one engine reference for its whole life and nothing else worth
/// mentioning; cloning shares the engine.
///
/// # Example
///
/// ```
/// use logbridge::adapters::{EngineAdapter, RecordingEngine};
/// use logbridge::domain::models::LogMessage;
/// use logbridge::domain::ports::Logger;
/// use std::sync::Arc;
///
/// let engine = Arc::new(RecordingEngine::new("example"));
/// let adapter = EngineAdapter::new(engine.clone());
///
/// adapter
///     .log(&LogMessage::warning("retrying {0} of {1}").with_value(1).with_value(3))
///     .unwrap();
/// assert_eq!(engine.count(), 1);
/// ```
#[derive(Clone)]
pub struct EngineAdapter {
    engine: Arc<dyn LogEngine>,
    runtime: Option<Handle>,
}

impl EngineAdapter {
    /// Wrap a pre-configured engine logger
    pub fn new(engine: Arc<dyn LogEngine>) -> Self {
        Self {
            engine,
            runtime: None,
        }
    }

    /// Acquire the logger named `name` from `provider` and wrap it
    pub fn from_provider(provider: &dyn LogEngineProvider, name: &str) -> Self {
        Self::new(provider.logger(name))
    }

    /// Acquire the logger associated with type `T` and wrap it
    pub fn for_type<T: ?Sized, P: LogEngineProvider>(provider: &P) -> Self {
        Self::new(provider.logger_for::<T>())
    }

    /// Run `log_async` work on `runtime` instead of the ambient runtime
    #[must_use]
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// The wrapped engine logger
    pub fn engine(&self) -> &Arc<dyn LogEngine> {
        &self.engine
    }
}

impl std::fmt::Debug for EngineAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineAdapter")
            .field("engine", &self.engine.name())
            .field("runtime", &self.runtime.is_some())
            .finish()
    }
}

impl Logger for EngineAdapter {
    fn log(&self, message: &dyn Message) -> Result<(), EngineError> {
        dispatch(self.engine.as_ref(), message)
    }

    fn log_async(&self, message: Arc<dyn Message>, token: CancellationToken) -> LogTask {
        let engine = Arc::clone(&self.engine);

        LogTask::spawn_blocking(self.runtime.as_ref(), move || {
            // Only checkpoint: emission itself is not interruptible
            if token.is_cancelled() {
                return Err(LogAsyncError::Cancelled);
            }
            dispatch(engine.as_ref(), message.as_ref()).map_err(LogAsyncError::from)
        })
    }
}
