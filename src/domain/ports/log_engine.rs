use serde_json::Value;
use std::sync::Arc;

use crate::domain::error::EngineError;

/// Port trait for a named logger owned by an external logging engine
///
/// One emission call per severity, each taking a composite format
/// template and its positional values. Formatting and writing to sinks
/// are entirely the engine's concern.
///
/// Implementations must be safe to call from many threads at once.
pub trait LogEngine: Send + Sync {
    /// Name (category) this logger was acquired under
    fn name(&self) -> &str;

    /// Emit a debug record
    fn debug_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError>;

    /// Emit an informational record
    fn info_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError>;

    /// Emit a warning record
    fn warn_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError>;

    /// Emit an error record
    fn error_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError>;
}

/// Port trait for acquiring named loggers from an engine
pub trait LogEngineProvider: Send + Sync {
    /// Get the logger registered under `name`
    fn logger(&self, name: &str) -> Arc<dyn LogEngine>;

    /// Get the logger associated with type `T`
    ///
    /// The name is the fully qualified type path, e.g.
    /// `my_app::db::Repository`.
    fn logger_for<T: ?Sized>(&self) -> Arc<dyn LogEngine>
    where
        Self: Sized,
    {
        self.logger(std::any::type_name::<T>())
    }
}
