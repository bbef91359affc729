//! Configuration module for student-service.

use service_core::config::{self as core_config, env_or};
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StudentConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub course_service: CourseServiceConfig,
}

#[derive(Debug, Clone)]
pub struct CourseServiceConfig {
    /// Base URL of course-service, without the `/course` path.
    pub url: String,
    /// Upper bound for one outbound call, connect and body included.
    pub timeout: Duration,
}

impl StudentConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "student-service".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            course_service: CourseServiceConfig {
                url: env::var("COURSE_SERVICE_URL")
                    .unwrap_or_else(|_| "http://course-service:8080".to_string()),
                timeout: Duration::from_millis(env_or("COURSE_SERVICE_TIMEOUT_MS", 5000u64)?),
            },
        })
    }
}
