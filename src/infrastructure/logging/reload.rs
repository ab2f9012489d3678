use anyhow::{Context, Result};
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

use super::logger::{build_filter, FilterHandle};
use crate::domain::models::EngineConfig;

/// Applies new configurations to a live engine
///
/// Only the filter (level and directives) can change without rebuilding
/// the subscriber. Sink changes are recorded but take effect on the next
/// initialization.
pub struct FilterReloader {
    handle: FilterHandle,
    current: Mutex<EngineConfig>,
}

impl FilterReloader {
    /// Track `handle`, whose filter was built from `initial`
    pub fn new(handle: FilterHandle, initial: EngineConfig) -> Self {
        Self {
            handle,
            current: Mutex::new(initial),
        }
    }

    /// The configuration most recently applied
    pub fn current(&self) -> EngineConfig {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in the filter described by `next`
    ///
    /// On error the previous filter stays active. Concurrent calls are
    /// serialized so the recorded configuration always matches the
    /// active filter.
    pub fn apply(&self, next: EngineConfig) -> Result<()> {
        let filter = build_filter(&next)?;

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        self.handle
            .reload(filter)
            .context("Log engine subscriber is no longer running")?;

        if !current.same_sinks(&next) {
            warn!(
                "log engine sink settings changed; they apply after the engine is reinitialized"
            );
        }
        info!(level = %next.level, directives = next.directives.len(), "log engine filter reloaded");
        *current = next;
        Ok(())
    }
}

impl std::fmt::Debug for FilterReloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterReloader")
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}
