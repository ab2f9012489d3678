//! Recording log engine for testing.

use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::error::EngineError;
use crate::domain::ports::{LogEngine, LogEngineProvider};

/// Emission method invoked on a [`RecordingEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionKind {
    /// `debug_format`
    Debug,
    /// `info_format`
    Info,
    /// `warn_format`
    Warn,
    /// `error_format`
    Error,
}

/// One recorded emission call
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    /// Which method was called
    pub kind: EmissionKind,
    /// Format template as received
    pub format: String,
    /// Values as received
    pub values: Vec<Value>,
}

type EmitHook = Box<dyn Fn(&Emission) + Send + Sync>;

/// Log engine that records every emission call instead of writing it
///
/// Optionally fails every call with a fixed error message, and can run a
/// hook inside each call to observe or interfere with in-flight emission.
pub struct RecordingEngine {
    name: String,
    emissions: Mutex<Vec<Emission>>,
    failure: Option<String>,
    hook: Option<EmitHook>,
}

impl RecordingEngine {
    /// Create a recording engine that accepts every call
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emissions: Mutex::new(Vec::new()),
            failure: None,
            hook: None,
        }
    }

    /// Create a recording engine whose calls all fail with `message`
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(name)
        }
    }

    /// Run `hook` inside every emission call, after recording it
    #[must_use]
    pub fn with_hook(mut self, hook: impl Fn(&Emission) + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Snapshot of the recorded calls in arrival order
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded calls
    pub fn count(&self) -> usize {
        self.emissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn record(&self, kind: EmissionKind, format: &str, values: &[Value]) -> Result<(), EngineError> {
        let emission = Emission {
            kind,
            format: format.to_string(),
            values: values.to_vec(),
        };
        self.emissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(emission.clone());

        if let Some(hook) = &self.hook {
            hook(&emission);
        }

        match &self.failure {
            Some(message) => Err(EngineError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for RecordingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingEngine")
            .field("name", &self.name)
            .field("emissions", &self.count())
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

impl LogEngine for RecordingEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn debug_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError> {
        self.record(EmissionKind::Debug, format, values)
    }

    fn info_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError> {
        self.record(EmissionKind::Info, format, values)
    }

    fn warn_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError> {
        self.record(EmissionKind::Warn, format, values)
    }

    fn error_format(&self, format: &str, values: &[Value]) -> Result<(), EngineError> {
        self.record(EmissionKind::Error, format, values)
    }
}

/// Provider handing out one shared [`RecordingEngine`] per name
#[derive(Debug, Default)]
pub struct RecordingProvider {
    engines: Mutex<Vec<Arc<RecordingEngine>>>,
}

impl RecordingProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine registered under `name`, if one was acquired
    pub fn get(&self, name: &str) -> Option<Arc<RecordingEngine>> {
        self.engines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|engine| engine.name == name)
            .cloned()
    }
}

impl LogEngineProvider for RecordingProvider {
    fn logger(&self, name: &str) -> Arc<dyn LogEngine> {
        let mut engines = self.engines.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = engines.iter().find(|engine| engine.name == name) {
            return existing.clone();
        }
        let engine = Arc::new(RecordingEngine::new(name));
        engines.push(Arc::clone(&engine));
        engine
    }
}
