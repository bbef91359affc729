//! HTTP handlers for course-service.

pub mod courses;
pub mod health;

pub use health::{health_check, metrics_handler, readiness_check};
