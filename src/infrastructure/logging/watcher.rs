//! Hot reload of engine configuration files.

use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::reload::FilterReloader;
use crate::infrastructure::config::ConfigLoader;

/// Watches a configuration file and reapplies it on change
///
/// The parent directory is watched rather than the file itself so that
/// editors replacing the file atomically are still noticed. Invalid
/// files are logged and ignored; the running filter stays in place.
///
/// Only the filter (level and directives) is reapplied. Sink settings
/// (format, log directory, file name, rotation, stdout, ansi) read from a
/// changed file are recorded but keep their startup values until the
/// engine is configured again.
///
/// Dropping the watcher stops it.
pub struct ConfigWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Start watching `path`, applying changes through `reloader`
    pub fn spawn(path: &Path, reloader: Arc<FilterReloader>) -> Result<Self> {
        let target = path.to_path_buf();
        let file_name = target
            .file_name()
            .map(OsString::from)
            .with_context(|| format!("Not a file path: {}", target.display()))?;
        let directory = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let reload_path = target.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if touches(&event, &file_name) => reload_from(&reload_path, &reloader),
                Ok(_) => {}
                Err(err) => warn!(error = %err, "log engine config watcher error"),
            },
            NotifyConfig::default(),
        )
        .context("Failed to create config file watcher")?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", directory.display()))?;

        debug!(path = %target.display(), "watching log engine configuration");

        Ok(Self {
            path: target,
            _watcher: watcher,
        })
    }

    /// The watched file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWatcher")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn touches(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name.as_os_str()))
}

fn reload_from(path: &Path, reloader: &FilterReloader) {
    let result = ConfigLoader::load_from_file(path).and_then(|config| reloader.apply(config));

    match result {
        Ok(()) => info!(path = %path.display(), "log engine configuration reloaded"),
        Err(err) => warn!(
            path = %path.display(),
            error = %format!("{err:#}"),
            "ignoring invalid log engine configuration"
        ),
    }
}
