//! Logbridge - severity-routed logging adapter
//!
//! Logbridge exposes a small, engine-agnostic [`Logger`] capability and
//! implements it on top of an external log engine. Each message carries a
//! severity, a composite format template and its values; the adapter hands
//! template and values to exactly one of the engine's level-specific
//! formatting methods, chosen by severity alone.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Message and configuration models, port traits
//! - **Adapters** (`adapters`): The engine adapter and a recording engine
//! - **Infrastructure Layer** (`infrastructure`): tracing engine, configuration, setup
//!
//! # Example
//!
//! ```no_run
//! use logbridge::domain::models::LogMessage;
//! use logbridge::domain::ports::Logger;
//! use logbridge::infrastructure::config::FileSource;
//! use logbridge::infrastructure::configure;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let guard = configure(&FileSource::new("logbridge.yaml"), true).await?;
//!     let logger = guard.adapter("billing");
//!
//!     logger.log(&LogMessage::warning("retrying {0} of {1}").with_value(1).with_value(3))?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use adapters::EngineAdapter;
pub use domain::models::{
    EngineConfig, LogFormat, LogMessage, Message, MessageSeverity, RotationPolicy,
};
pub use domain::ports::{ConfigSource, LogEngine, LogEngineProvider, LogTask, Logger};
pub use domain::{EngineError, FormatError, LogAsyncError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::{adapter_for, configure, EngineGuard};
