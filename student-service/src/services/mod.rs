//! Services module for student-service.

pub mod course_client;
pub mod metrics;
pub mod upstream;

pub use course_client::{CourseServiceClient, HttpCourseServiceClient};
pub use metrics::{get_metrics, init_metrics, record_upstream_request};
pub use upstream::{UpstreamBody, UpstreamError, UpstreamResponse};
