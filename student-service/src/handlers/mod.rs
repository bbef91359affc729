//! HTTP handlers for student-service.

pub mod courses;
pub mod health;

pub use health::{health_check, metrics_handler, readiness_check};
