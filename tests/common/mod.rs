//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use logbridge::adapters::{EngineAdapter, RecordingEngine};
use logbridge::domain::models::{EngineConfig, LogFormat};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
#[allow(dead_code)]
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Adapter over a fresh recording engine
#[allow(dead_code)]
pub fn recording_adapter(name: &str) -> (Arc<RecordingEngine>, EngineAdapter) {
    let engine = Arc::new(RecordingEngine::new(name));
    let adapter = EngineAdapter::new(engine.clone());
    (engine, adapter)
}

/// Plain-text stdout configuration at `level`, suitable for capture
#[allow(dead_code)]
pub fn compact_config(level: &str) -> EngineConfig {
    EngineConfig {
        level: level.to_string(),
        format: LogFormat::Compact,
        ansi: false,
        ..EngineConfig::default()
    }
}

/// Write `content` to `name` inside `dir`
#[allow(dead_code)]
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write config file");
    path
}

/// Replace `path` with `content` in a single rename
#[allow(dead_code)]
pub fn replace_config(path: &Path, content: &str) {
    let staging = path.with_extension("staging");
    fs::write(&staging, content).expect("Failed to write staging file");
    fs::rename(&staging, path).expect("Failed to replace config file");
}

/// Poll `predicate` until it holds or `timeout` elapses
#[allow(dead_code)]
pub fn wait_for(mut predicate: impl FnMut() -> bool, timeout: std::time::Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if predicate() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    predicate()
}
