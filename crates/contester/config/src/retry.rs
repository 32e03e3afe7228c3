use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default maximum number of retries for a failed event.
const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default delay before the first retry in milliseconds.
const DEFAULT_BASE_DELAY_MS: u64 = 1_000;

/// Default backoff multiplier.
const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Default cap on the retry delay in milliseconds.
const DEFAULT_MAX_DELAY_MS: u64 = 60_000;

/// Retry policy applied by the event dispatch task to retryable handler
/// failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first failure.
    #[serde(default = "default_values::max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds.
    #[serde(default = "default_values::base_delay_ms")]
    pub base_delay_ms: u64,

    /// Multiplier applied for each subsequent retry (exponential backoff).
    #[serde(default = "default_values::multiplier")]
    pub multiplier: f64,

    /// Maximum delay cap in milliseconds.
    #[serde(default = "default_values::max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            multiplier: DEFAULT_MULTIPLIER,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl RetryConfig {
    /// Calculates the delay before retry number `retry_count` (zero-based).
    pub fn calculate_delay(&self, retry_count: u32) -> Duration {
        if retry_count == 0 {
            return Duration::from_millis(self.base_delay_ms.min(self.max_delay_ms));
        }

        let delay = self.base_delay_ms as f64 * self.multiplier.powi(retry_count as i32);
        Duration::from_millis(delay.min(self.max_delay_ms as f64) as u64)
    }

    /// Checks if another retry is allowed after `retry_count` retries.
    pub fn should_retry(&self, retry_count: u32) -> bool {
        retry_count < self.max_retries
    }
}

mod default_values {
    use super::*;

    pub(super) fn max_retries() -> u32 {
        DEFAULT_MAX_RETRIES
    }

    pub(super) fn base_delay_ms() -> u64 {
        DEFAULT_BASE_DELAY_MS
    }

    pub(super) fn multiplier() -> f64 {
        DEFAULT_MULTIPLIER
    }

    pub(super) fn max_delay_ms() -> u64 {
        DEFAULT_MAX_DELAY_MS
    }
}
