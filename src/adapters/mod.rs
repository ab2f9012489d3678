//! Adapters implementing the logging port.

pub mod engine_adapter;
pub mod recording;

pub use engine_adapter::EngineAdapter;
pub use recording::{Emission, EmissionKind, RecordingEngine, RecordingProvider};
