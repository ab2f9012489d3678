pub mod config;
pub mod message;

pub use config::{EngineConfig, LogFormat, RotationPolicy};
pub use message::{LogMessage, Message, MessageSeverity};
