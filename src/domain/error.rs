use thiserror::Error;

/// Errors raised while rendering a composite format template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Format item {index} at offset {offset} has no matching value ({count} supplied)")]
    IndexOutOfRange {
        index: usize,
        count: usize,
        offset: usize,
    },

    #[error("Unclosed format item starting at offset {0}")]
    UnclosedItem(usize),

    #[error("Unescaped closing brace at offset {0}")]
    UnescapedBrace(usize),

    #[error("Malformed format item at offset {offset}: {reason}")]
    MalformedItem { offset: usize, reason: String },
}

/// Errors raised by a log engine's emission calls
///
/// The adapter hands these back to its caller as-is.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine error: {0}")]
    Backend(String),
}

/// Errors completing an asynchronous log operation
#[derive(Error, Debug)]
pub enum LogAsyncError {
    #[error("Log operation was cancelled before it started")]
    Cancelled,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("No Tokio runtime available to run the log operation")]
    NoRuntime,
}

impl LogAsyncError {
    /// Returns true for the cancellation fault
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
