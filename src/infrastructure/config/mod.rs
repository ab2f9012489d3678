//! Configuration management infrastructure
//!
//! Log engine configuration using figment:
//! - YAML, JSON and TOML documents
//! - Environment variable overrides for files
//! - Configuration validation
//! - File, stream, URI and in-memory sources

pub mod loader;
pub mod sources;

pub use loader::{ConfigError, ConfigLoader, DocumentFormat, ENV_PREFIX};
pub use sources::{ElementSource, FileSource, StreamSource, UriSource};
