//! Prometheus metrics for course-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter, HistogramVec, IntCounter, TextEncoder,
};

/// Store query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "course_store_query_duration_seconds",
        "Course store query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register course_store_query_duration_seconds")
});

pub static COURSES_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "course_courses_created_total",
        "Total number of courses created"
    )
    .expect("Failed to register course_courses_created_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&COURSES_CREATED);
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
