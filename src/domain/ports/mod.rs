//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces adapters implement:
//! - Logger: the generic logging capability hosting code calls
//! - LogEngine / LogEngineProvider: the external engine being adapted
//! - ConfigSource: where engine configuration comes from
//!
//! These traits keep the domain independent of `tracing` and of any
//! particular configuration format.

pub mod config_source;
pub mod log_engine;
pub mod logger;

pub use config_source::ConfigSource;
pub use log_engine::{LogEngine, LogEngineProvider};
pub use logger::{LogTask, Logger};
