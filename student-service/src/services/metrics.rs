//! Prometheus metrics for student-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Upstream calls by operation and outcome (success, not_found, client_error, ...).
pub static UPSTREAM_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "student_upstream_requests_total",
        "Total number of course-service calls",
        &["operation", "outcome"]
    )
    .expect("Failed to register student_upstream_requests_total")
});

pub static UPSTREAM_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "student_upstream_request_duration_seconds",
        "course-service call duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register student_upstream_request_duration_seconds")
});

pub fn record_upstream_request(operation: &str, outcome: &str) {
    UPSTREAM_REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&UPSTREAM_REQUESTS_TOTAL);
    Lazy::force(&UPSTREAM_REQUEST_DURATION);
    Lazy::force(&service_core::middleware::metrics::HTTP_REQUESTS_TOTAL);
    Lazy::force(&service_core::middleware::metrics::HTTP_REQUEST_DURATION);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
