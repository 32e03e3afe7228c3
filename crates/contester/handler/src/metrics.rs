//! Prometheus metrics for the contester.
//!
//! Metrics are registered with the default prometheus registry on first use and can also be
//! registered with [`REGISTRY`] for a dedicated scrape endpoint.

use std::time::Duration;

use contester_common::{BlockId, ProofTier};
use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Histogram,
    HistogramOpts, IntCounterVec, IntGauge, Registry,
};

use crate::ProofVerdict;

lazy_static! {
    /// Registry for all contester metrics
    pub static ref REGISTRY: Registry = Registry::new();

    /// Gauge tracking the block id of the latest transition-proved event received
    pub static ref RECEIVED_PROVEN_BLOCK: IntGauge = register_int_gauge!(
        "contester_received_proven_block",
        "Block id of the latest proven transition received"
    )
    .unwrap();

    /// Counter for verification results
    pub static ref VERIFICATION_OUTCOMES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "contester_verification_outcomes_total",
        "Total number of proven transitions checked against the local chain",
        &["outcome"] // outcome=[valid|invalid|incomplete|error]
    )
    .unwrap();

    /// Counter for contests handed to the submission pipeline
    pub static ref CONTESTS_FILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "contester_contests_filed_total",
        "Total number of contest requests enqueued",
        &["tier"]
    )
    .unwrap();

    /// Histogram tracking the duration of a single handler attempt
    pub static ref HANDLE_DURATION: Histogram = register_histogram!(
        HistogramOpts::new(
            "contester_handle_duration_seconds",
            "Time spent handling one transition-proved event"
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0])
    )
    .unwrap();
}

/// Registers all contester metrics with [`REGISTRY`].
pub fn register_metrics() -> Result<(), prometheus::Error> {
    register_with(&REGISTRY)
}

/// Registers all contester metrics with `registry`.
pub fn register_with(registry: &Registry) -> Result<(), prometheus::Error> {
    registry.register(Box::new(RECEIVED_PROVEN_BLOCK.clone()))?;
    registry.register(Box::new(VERIFICATION_OUTCOMES_TOTAL.clone()))?;
    registry.register(Box::new(CONTESTS_FILED_TOTAL.clone()))?;
    registry.register(Box::new(HANDLE_DURATION.clone()))?;
    Ok(())
}

pub(crate) fn set_received_proven_block(block_id: BlockId) {
    RECEIVED_PROVEN_BLOCK.set(i64::try_from(block_id.as_u64()).unwrap_or(i64::MAX));
}

pub(crate) fn record_verdict(verdict: &ProofVerdict) {
    let outcome = if verdict.is_valid() { "valid" } else { "invalid" };
    VERIFICATION_OUTCOMES_TOTAL
        .with_label_values(&[outcome])
        .inc();
}

pub(crate) fn record_verification_failure(incomplete: bool) {
    let outcome = if incomplete { "incomplete" } else { "error" };
    VERIFICATION_OUTCOMES_TOTAL
        .with_label_values(&[outcome])
        .inc();
}

pub(crate) fn record_contest_filed(tier: ProofTier) {
    let tier = tier.to_string();
    CONTESTS_FILED_TOTAL
        .with_label_values(&[tier.as_str()])
        .inc();
}

pub(crate) fn observe_handle_duration(elapsed: Duration) {
    HANDLE_DURATION.observe(elapsed.as_secs_f64());
}
