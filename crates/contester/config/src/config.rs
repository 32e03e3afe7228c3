use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, RetryConfig};

/// Default capacity of the contest dispatch queue.
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Default timeout of a single handler attempt in milliseconds.
const DEFAULT_HANDLER_TIMEOUT_MS: u64 = 30_000;

/// Default number of events handled concurrently.
const DEFAULT_MAX_CONCURRENT_EVENTS: usize = 8;

/// Default log file name prefix.
const DEFAULT_LOG_FILE_PREFIX: &str = "contester";

/// Contester configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContesterConfig {
    /// Contester role and dispatch settings.
    #[serde(default)]
    pub contester: ContesterSection,

    /// Retry policy for failed events.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Contester role and event dispatch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContesterSection {
    /// Whether this instance contests invalid transitions. When false, proven
    /// transitions are only observed.
    #[serde(default)]
    pub enabled: bool,

    /// Capacity of the queue between the handler and the submission pipeline.
    #[serde(default = "default_values::queue_capacity")]
    pub queue_capacity: usize,

    /// Timeout of a single handler attempt in milliseconds.
    #[serde(default = "default_values::handler_timeout_ms")]
    pub handler_timeout_ms: u64,

    /// Maximum number of events handled at the same time.
    #[serde(default = "default_values::max_concurrent_events")]
    pub max_concurrent_events: usize,
}

impl Default for ContesterSection {
    fn default() -> Self {
        Self {
            enabled: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            handler_timeout_ms: DEFAULT_HANDLER_TIMEOUT_MS,
            max_concurrent_events: DEFAULT_MAX_CONCURRENT_EVENTS,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON instead of compact text.
    #[serde(default)]
    pub json: bool,

    /// Directory for rotated log files. Stdout only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Log file name prefix.
    #[serde(default = "default_values::log_file_prefix")]
    pub file_name_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            log_dir: None,
            file_name_prefix: DEFAULT_LOG_FILE_PREFIX.to_owned(),
        }
    }
}

mod default_values {
    use super::*;

    pub(super) fn queue_capacity() -> usize {
        DEFAULT_QUEUE_CAPACITY
    }

    pub(super) fn handler_timeout_ms() -> u64 {
        DEFAULT_HANDLER_TIMEOUT_MS
    }

    pub(super) fn max_concurrent_events() -> usize {
        DEFAULT_MAX_CONCURRENT_EVENTS
    }

    pub(super) fn log_file_prefix() -> String {
        DEFAULT_LOG_FILE_PREFIX.to_owned()
    }
}

impl ContesterConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ContesterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contester.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "contester.queue_capacity must be greater than zero".into(),
            ));
        }
        if self.contester.max_concurrent_events == 0 {
            return Err(ConfigError::Invalid(
                "contester.max_concurrent_events must be greater than zero".into(),
            ));
        }
        if self.contester.handler_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "contester.handler_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.retry.multiplier < 1.0 {
            return Err(ConfigError::Invalid(
                "retry.multiplier must be at least 1.0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE_CONFIG: &str = r#"
[contester]
enabled = true
queue_capacity = 16
handler_timeout_ms = 5000
max_concurrent_events = 4

[retry]
max_retries = 3
base_delay_ms = 250
multiplier = 1.5
max_delay_ms = 10000

[logging]
json = true
log_dir = "/var/log/contester"
"#;

    #[test]
    fn test_sample_config() {
        let config = ContesterConfig::from_toml_str(SAMPLE_CONFIG).unwrap();

        assert!(config.contester.enabled);
        assert_eq!(config.contester.queue_capacity, 16);
        assert_eq!(config.contester.handler_timeout_ms, 5_000);
        assert_eq!(config.contester.max_concurrent_events, 4);
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.base_delay_ms, 250);
        assert!(config.logging.json);
        assert_eq!(
            config.logging.log_dir,
            Some(PathBuf::from("/var/log/contester"))
        );
        assert_eq!(config.logging.file_name_prefix, DEFAULT_LOG_FILE_PREFIX);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ContesterConfig::from_toml_str("").unwrap();

        assert_eq!(config, ContesterConfig::default());
        assert!(!config.contester.enabled);
        assert_eq!(config.contester.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.logging.log_dir, None);
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config = ContesterConfig::from_toml_str("[contester]\nenabled = true\n").unwrap();

        assert!(config.contester.enabled);
        assert_eq!(
            config.contester.handler_timeout_ms,
            DEFAULT_HANDLER_TIMEOUT_MS
        );
        assert_eq!(
            config.contester.max_concurrent_events,
            DEFAULT_MAX_CONCURRENT_EVENTS
        );
    }

    #[test]
    fn test_sample_config_roundtrip_serialization() {
        let original = ContesterConfig::from_toml_str(SAMPLE_CONFIG).unwrap();
        let serialized = toml::to_string(&original).expect("serialize config");
        let roundtrip = ContesterConfig::from_toml_str(&serialized).unwrap();

        assert_eq!(original, roundtrip);
    }

    #[test]
    fn test_rejects_zero_queue_capacity() {
        let err = ContesterConfig::from_toml_str("[contester]\nqueue_capacity = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("queue_capacity"));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let err = ContesterConfig::from_toml_str("[contester]\nmax_concurrent_events = 0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_shrinking_backoff() {
        let err = ContesterConfig::from_toml_str("[retry]\nmultiplier = 0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = ContesterConfig::from_toml_str("[contester\nenabled = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CONFIG.as_bytes()).unwrap();

        let config = ContesterConfig::from_file(file.path()).unwrap();
        assert!(config.contester.enabled);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContesterConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
