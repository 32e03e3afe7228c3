//! Logging subsystem for the contester.

mod manager;
mod types;


pub use manager::init;
pub use types::{FileLoggingConfig, LoggerConfig, StdoutConfig};

// Re-export tracing-appender types for convenience
pub use tracing_appender::rolling::Rotation;
