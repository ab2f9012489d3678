//! Infrastructure layer module
//!
//! This module contains the concrete pieces behind the domain ports:
//! - Configuration loading and sources
//! - The tracing-backed log engine and its subscriber
//! - Engine setup and hot reload
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod setup;

pub use setup::{adapter_for, configure, configure_with, EngineGuard};
