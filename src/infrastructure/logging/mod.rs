//! Logging infrastructure
//!
//! The tracing-backed log engine behind the adapter:
//! - Named loggers emitting tracing events
//! - Composite format rendering
//! - Subscriber construction (stdout, rolling JSON files)
//! - Live filter reload and config file watching

pub mod capture;
pub mod engine;
pub mod format;
pub mod logger;
pub mod reload;
pub mod watcher;

pub use capture::CaptureWriter;
pub use engine::{TracingEngine, TracingLog, ENGINE_TARGET};
pub use format::render;
pub use logger::{
    build_filter, build_subscriber, build_subscriber_with_writer, install, BuiltSubscriber,
    EngineSubscriber, FilterHandle,
};
pub use reload::FilterReloader;
pub use watcher::ConfigWatcher;
