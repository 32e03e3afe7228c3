//! Configuration for the transition contester.
//!
//! The configuration is loaded from a TOML file. Every field has a default, so
//! an empty file yields a valid config with contester role disabled.

mod config;
mod error;
mod retry;

pub use config::{ContesterConfig, ContesterSection, LoggingConfig};
pub use error::ConfigError;
pub use retry::RetryConfig;
