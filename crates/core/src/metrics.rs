//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - PoetryDB requests (per endpoint, per status)
//! - Session retrievals (per mode, per outcome)
//! - Top-by-word pool filtering

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Upstream Metrics
// =============================================================================

/// PoetryDB requests total by endpoint and HTTP status ("error" without one).
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "stanza_upstream_requests_total",
            "Total PoetryDB requests",
        ),
        &["endpoint", "status"], // endpoint: "search", "random"
    )
    .unwrap()
});

/// PoetryDB request duration in seconds.
pub static UPSTREAM_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "stanza_upstream_duration_seconds",
            "Duration of PoetryDB requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["endpoint"],
    )
    .unwrap()
});

// =============================================================================
// Session Metrics
// =============================================================================

/// Retrievals total by mode and outcome.
pub static RETRIEVALS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("stanza_retrievals_total", "Total session retrievals"),
        &["mode", "outcome"], // outcome: "success", "failure", "stale"
    )
    .unwrap()
});

/// Poems kept after top-by-word filtering.
pub static POOL_SURVIVORS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "stanza_pool_survivors",
            "Poems kept per top-by-word ranking",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0]),
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(UPSTREAM_REQUESTS.clone()),
        Box::new(UPSTREAM_DURATION.clone()),
        Box::new(RETRIEVALS.clone()),
        Box::new(POOL_SURVIVORS.clone()),
    ]
}
