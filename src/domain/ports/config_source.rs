use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::models::EngineConfig;

/// Port trait for loading log engine configuration
///
/// Adapters exist for files, in-memory streams, URIs and structured
/// values. Each returns a validated [`EngineConfig`].
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Load and validate the configuration
    async fn load(&self) -> Result<EngineConfig>;

    /// Local file backing this source, if any
    ///
    /// Only file-backed sources can be watched for changes.
    fn watch_path(&self) -> Option<&Path> {
        None
    }

    /// Short human readable description for diagnostics
    fn describe(&self) -> String;
}
