use std::io;

use thiserror::Error;

/// Errors raised while loading or validating a [`ContesterConfig`](crate::ContesterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
