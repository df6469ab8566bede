// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the Paddock operator.
//!
//! This module provides metrics collection with the namespace prefix
//! `paddock_firestoned_io` (prometheus-safe version of "paddock.firestoned.io").
//!
//! # Metrics Categories
//!
//! - **Reconciliation Metrics** - Track reconcile invocations and outcomes
//! - **Resolution Metrics** - Track project match/create results
//! - **Registry Metrics** - Track cluster registry refreshes and size
//! - **Error Metrics** - Track error reason codes
//!
//! # Example
//!
//! ```rust,no_run
//! use paddock::metrics::record_reconciliation;
//!
//! // Record a reconciliation outcome
//! record_reconciliation("assigned", std::time::Duration::from_millis(120));
//! ```

use prometheus::{
    CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all Paddock metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "paddock_firestoned_io";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Reconciliation Metrics
// ============================================================================

/// Total number of namespace reconciliations by outcome
///
/// Labels:
/// - `outcome`: Result of the invocation (`assigned`, `already_assigned`,
///   `no_owner_label`, `no_match`, `empty_project_id`, `gone`, `error`)
pub static RECONCILIATION_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_reconciliations_total"),
        "Total number of namespace reconciliations by outcome",
    );
    let counter = CounterVec::new(opts, &["outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of namespace reconciliations in seconds
pub static RECONCILIATION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_reconciliation_duration_seconds"),
        "Duration of namespace reconciliations in seconds by outcome",
    )
    .buckets(vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]);
    let histogram = HistogramVec::new(opts, &["outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

// ============================================================================
// Resolution Metrics
// ============================================================================

/// Total number of project resolutions by result
///
/// Labels:
/// - `result`: Resolution result (`matched`, `no_match`, `created`)
pub static PROJECT_RESOLUTIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_project_resolutions_total"),
        "Total number of project resolutions by result",
    );
    let counter = CounterVec::new(opts, &["result"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Registry Metrics
// ============================================================================

/// Total number of cluster registry refreshes by status
///
/// Labels:
/// - `status`: Refresh result (`success`, `error`)
pub static REGISTRY_REFRESHES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_registry_refreshes_total"),
        "Total number of cluster registry refreshes by status",
    );
    let counter = CounterVec::new(opts, &["status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Number of member clusters in the current registry snapshot
pub static REGISTRY_CLUSTERS: LazyLock<Gauge> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_registry_clusters"),
        "Number of member clusters in the current registry snapshot",
    );
    let gauge = Gauge::with_opts(opts).unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

// ============================================================================
// Error Metrics
// ============================================================================

/// Total number of reconciliation errors by reason code
///
/// Labels:
/// - `reason`: Stable reason code (e.g. `ProjectListFailed`, `ApiError`)
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of reconciliation errors by reason code",
    );
    let counter = CounterVec::new(opts, &["reason"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a completed reconciliation
///
/// # Arguments
/// * `outcome` - Outcome label (e.g. `assigned`, `no_match`)
/// * `duration` - Duration of the reconciliation
pub fn record_reconciliation(outcome: &str, duration: Duration) {
    RECONCILIATION_TOTAL.with_label_values(&[outcome]).inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&[outcome])
        .observe(duration.as_secs_f64());
}

/// Record a failed reconciliation
///
/// # Arguments
/// * `duration` - Duration of the reconciliation before failure
/// * `reason` - Stable reason code for the failure
pub fn record_reconciliation_error(duration: Duration, reason: &str) {
    record_reconciliation("error", duration);
    ERRORS_TOTAL.with_label_values(&[reason]).inc();
}

/// Record a project resolution result
///
/// # Arguments
/// * `result` - Resolution result (`matched`, `no_match`, `created`)
pub fn record_project_resolution(result: &str) {
    PROJECT_RESOLUTIONS_TOTAL
        .with_label_values(&[result])
        .inc();
}

/// Record a cluster registry refresh
///
/// # Arguments
/// * `success` - Whether the refresh replaced the snapshot
/// * `clusters` - Number of clusters in the current snapshot
pub fn record_registry_refresh(success: bool, clusters: usize) {
    let status = if success { "success" } else { "error" };
    REGISTRY_REFRESHES_TOTAL
        .with_label_values(&[status])
        .inc();
    #[allow(clippy::cast_precision_loss)]
    REGISTRY_CLUSTERS.set(clusters as f64);
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Returns
/// Prometheus-formatted metrics as a String
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}
