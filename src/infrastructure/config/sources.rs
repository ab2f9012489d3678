//! Configuration source adapters
//!
//! One adapter per place engine configuration can come from: a local
//! file, an already-open stream, a URI, or an in-memory element.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::loader::{ConfigLoader, DocumentFormat};
use crate::domain::models::EngineConfig;
use crate::domain::ports::ConfigSource;

/// Configuration read from a local file
///
/// The only source that supports watching for changes.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    async fn load(&self) -> Result<EngineConfig> {
        ConfigLoader::load_from_file(&self.path)
    }

    fn watch_path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Configuration read once from a byte stream
#[derive(Debug, Clone)]
pub struct StreamSource {
    content: String,
    format: DocumentFormat,
}

impl StreamSource {
    /// Drain `reader` into a YAML source
    pub fn from_reader(reader: impl Read) -> std::io::Result<Self> {
        Self::from_reader_as(reader, DocumentFormat::Yaml)
    }

    /// Drain `reader` into a source of the given format
    pub fn from_reader_as(mut reader: impl Read, format: DocumentFormat) -> std::io::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self { content, format })
    }
}

#[async_trait]
impl ConfigSource for StreamSource {
    async fn load(&self) -> Result<EngineConfig> {
        ConfigLoader::load_from_str(&self.content, self.format)
    }

    fn describe(&self) -> String {
        format!("{:?} stream ({} bytes)", self.format, self.content.len())
    }
}

/// Configuration addressed by URI
///
/// `file://` URIs read the local file (and can be watched); `http://` and
/// `https://` URIs are fetched once per load.
#[derive(Debug, Clone)]
pub struct UriSource {
    uri: Url,
    local: Option<PathBuf>,
    client: reqwest::Client,
}

impl UriSource {
    /// Parse `uri` and check its scheme is supported
    pub fn parse(uri: &str) -> Result<Self> {
        let uri = Url::parse(uri).with_context(|| format!("Invalid configuration URI: {uri}"))?;
        Self::new(uri)
    }

    /// Source for an already parsed URI
    pub fn new(uri: Url) -> Result<Self> {
        let local = match uri.scheme() {
            "file" => Some(
                uri.to_file_path()
                    .map_err(|()| anyhow::anyhow!("URI is not a local file path: {uri}"))?,
            ),
            "http" | "https" => None,
            other => anyhow::bail!("Unsupported configuration URI scheme: {other}"),
        };

        Ok(Self {
            uri,
            local,
            client: reqwest::Client::new(),
        })
    }

    /// The configured URI
    pub const fn uri(&self) -> &Url {
        &self.uri
    }

    async fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(self.uri.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", self.uri))?
            .error_for_status()
            .with_context(|| format!("Configuration server rejected {}", self.uri))?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to read configuration body from {}", self.uri))
    }
}

#[async_trait]
impl ConfigSource for UriSource {
    async fn load(&self) -> Result<EngineConfig> {
        if let Some(path) = &self.local {
            return ConfigLoader::load_from_file(path);
        }

        let content = self.fetch().await?;
        let format = DocumentFormat::from_path(Path::new(self.uri.path()));
        ConfigLoader::load_from_str(&content, format)
    }

    fn watch_path(&self) -> Option<&Path> {
        self.local.as_deref()
    }

    fn describe(&self) -> String {
        format!("uri {}", self.uri)
    }
}

/// Configuration supplied as an in-memory structured element
#[derive(Debug, Clone)]
pub struct ElementSource {
    element: Value,
}

impl ElementSource {
    /// Source for `element`, which must be a map
    pub const fn new(element: Value) -> Self {
        Self { element }
    }
}

impl From<EngineConfig> for ElementSource {
    fn from(config: EngineConfig) -> Self {
        // EngineConfig always serializes to a map
        let element = serde_json::to_value(config).unwrap_or_default();
        Self::new(element)
    }
}

#[async_trait]
impl ConfigSource for ElementSource {
    async fn load(&self) -> Result<EngineConfig> {
        ConfigLoader::load_from_value(&self.element)
    }

    fn describe(&self) -> String {
        "in-memory element".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::LogFormat;
    use serde_json::json;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_stream_source_reads_yaml() {
        let source = StreamSource::from_reader(Cursor::new("level: warn\nformat: compact")).unwrap();
        let config = source.load().await.unwrap();

        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(source.watch_path().is_none());
    }

    #[tokio::test]
    async fn test_stream_source_json() {
        let source =
            StreamSource::from_reader_as(Cursor::new(r#"{"level":"error"}"#), DocumentFormat::Json)
                .unwrap();
        assert_eq!(source.load().await.unwrap().level, "error");
    }

    #[tokio::test]
    async fn test_element_source() {
        let source = ElementSource::new(json!({ "level": "debug", "ansi": false }));
        let config = source.load().await.unwrap();

        assert_eq!(config.level, "debug");
        assert!(!config.ansi);
        assert_eq!(source.describe(), "in-memory element");
    }

    #[tokio::test]
    async fn test_element_source_from_config() {
        let original = EngineConfig {
            level: "trace".to_string(),
            directives: vec!["hyper=off".to_string()],
            ..EngineConfig::default()
        };

        let loaded = ElementSource::from(original.clone()).load().await.unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_uri_source_schemes() {
        let file = UriSource::parse("file:///etc/logbridge.yaml").unwrap();
        assert_eq!(file.watch_path(), Some(Path::new("/etc/logbridge.yaml")));

        let http = UriSource::parse("https://config.example.com/logbridge.yaml").unwrap();
        assert!(http.watch_path().is_none());

        assert!(UriSource::parse("ftp://example.com/logbridge.yaml").is_err());
        assert!(UriSource::parse("not a uri").is_err());
    }

    #[test]
    fn test_file_source_is_watchable() {
        let source = FileSource::new("/etc/logbridge.yaml");
        assert_eq!(source.watch_path(), Some(Path::new("/etc/logbridge.yaml")));
        assert!(source.describe().contains("/etc/logbridge.yaml"));
    }
}
