//! Configuration module for course-service.

use service_core::config::{self as core_config, env_or, env_required};
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct CourseConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub storage: StorageConfig,
}

/// Where courses are kept.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    Memory,
}

impl StorageConfig {
    pub fn backend_name(&self) -> &'static str {
        match self {
            StorageConfig::Postgres(_) => "postgres",
            StorageConfig::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

impl CourseConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let storage = match env_or("STORAGE_BACKEND", StorageBackend::Postgres)? {
            StorageBackend::Postgres => StorageConfig::Postgres(DatabaseConfig {
                url: env_required("DATABASE_URL")?,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", 2)?,
            }),
            StorageBackend::Memory => StorageConfig::Memory,
        };

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "course-service".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            storage,
        })
    }
}
