use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::error::{EngineError, LogAsyncError};
use crate::domain::models::Message;

/// Port trait for the generic logging capability
///
/// This is the only surface hosting code calls. Implementations translate
/// a [`Message`] into whatever their backend understands.
///
/// # Hexagonal Architecture
///
/// - This trait is a **port** defined in the domain layer
/// - [`EngineAdapter`](crate::adapters::EngineAdapter) is the **adapter**
///   forwarding to a [`LogEngine`](super::LogEngine)
/// - Application code depends on this trait only, so the engine can be
///   swapped without touching call sites
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single logger is shared by
/// any number of concurrent callers.
///
/// # Examples
///
/// ```no_run
/// use logbridge::domain::models::LogMessage;
/// use logbridge::domain::ports::Logger;
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
///
/// async fn report(logger: &dyn Logger, attempt: u32) -> anyhow::Result<()> {
///     let message = LogMessage::warning("retrying {0} of {1}")
///         .with_value(attempt)
///         .with_value(3);
///     logger.log(&message)?;
///
///     logger
///         .log_async(Arc::new(LogMessage::debug("ping")), CancellationToken::new())
///         .await?;
///     Ok(())
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log a message on the calling thread
    ///
    /// Blocks for as long as the backend's emission takes. Messages whose
    /// severity has no emission path are discarded and return `Ok(())`.
    /// Backend failures are returned unchanged.
    fn log(&self, message: &dyn Message) -> Result<(), EngineError>;

    /// Log a message on the blocking worker pool
    ///
    /// The work is scheduled before this returns; the returned [`LogTask`]
    /// only observes completion, and dropping it does not cancel the work.
    /// `token` is checked once when the worker starts. A token cancelled
    /// before that point fails the task with [`LogAsyncError::Cancelled`]
    /// and nothing is emitted; cancelling later has no effect.
    ///
    /// No ordering is guaranteed between concurrent calls.
    fn log_async(&self, message: Arc<dyn Message>, token: CancellationToken) -> LogTask;
}

/// Completion handle for [`Logger::log_async`]
///
/// Resolves to `Ok(())` after emission, `Err(Cancelled)` when the token
/// was cancelled before the worker started, or the backend's own error.
/// A panic raised by the backend on the worker is resumed on the task
/// awaiting this handle.
#[derive(Debug)]
#[must_use = "a LogTask reports whether the message was emitted"]
pub struct LogTask {
    state: TaskState,
}

#[derive(Debug)]
enum TaskState {
    Running(JoinHandle<Result<(), LogAsyncError>>),
    Failed(Option<LogAsyncError>),
}

impl LogTask {
    /// Run `work` on the blocking pool of `runtime`, or of the ambient
    /// runtime when `runtime` is `None`
    pub fn spawn_blocking<F>(runtime: Option<&Handle>, work: F) -> Self
    where
        F: FnOnce() -> Result<(), LogAsyncError> + Send + 'static,
    {
        let handle = match runtime {
            Some(handle) => handle.clone(),
            None => match Handle::try_current() {
                Ok(handle) => handle,
                Err(_) => return Self::failed(LogAsyncError::NoRuntime),
            },
        };

        Self {
            state: TaskState::Running(handle.spawn_blocking(work)),
        }
    }

    /// A task that is already complete with `error`
    pub const fn failed(error: LogAsyncError) -> Self {
        Self {
            state: TaskState::Failed(Some(error)),
        }
    }

    /// Returns true once the work has finished (or never started)
    pub fn is_finished(&self) -> bool {
        match &self.state {
            TaskState::Running(handle) => handle.is_finished(),
            TaskState::Failed(_) => true,
        }
    }
}

impl Future for LogTask {
    type Output = Result<(), LogAsyncError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            TaskState::Running(handle) => match Pin::new(handle).poll(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(join_error)) => {
                    if join_error.is_panic() {
                        std::panic::resume_unwind(join_error.into_panic());
                    }
                    // Runtime shut down before the worker ran
                    Poll::Ready(Err(LogAsyncError::Cancelled))
                }
            },
            TaskState::Failed(error) => {
                Poll::Ready(Err(error.take().unwrap_or(LogAsyncError::NoRuntime)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_runtime_fails_immediately() {
        let task = LogTask::spawn_blocking(None, || Ok(()));
        assert!(task.is_finished());

        let result = tokio_test::block_on(task);
        assert!(matches!(result, Err(LogAsyncError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_ambient_runtime_runs_work() {
        let result = LogTask::spawn_blocking(None, || Ok(())).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_explicit_runtime_handle() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let task = LogTask::spawn_blocking(Some(runtime.handle()), || {
            Err(LogAsyncError::Cancelled)
        });

        let result = runtime.block_on(task);
        assert!(matches!(result, Err(LogAsyncError::Cancelled)));
    }

    #[tokio::test]
    #[should_panic(expected = "engine exploded")]
    async fn test_worker_panic_is_resumed() {
        let _ = LogTask::spawn_blocking(None, || panic!("engine exploded")).await;
    }
}
