//! Domain layer for logbridge
//!
//! This module contains the message model, engine configuration model and
//! the port traits adapters implement.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{EngineError, FormatError, LogAsyncError};
