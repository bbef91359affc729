//! Common test utilities for course-service integration tests.

#![allow(dead_code)]

use course_service::config::{CourseConfig, StorageConfig};
use course_service::services::{CourseStore, InMemoryCourseStore};
use course_service::startup::Application;
use serde_json::Value;
use service_core::config::Config as CommonConfig;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,course_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn test_config(storage: StorageConfig) -> CourseConfig {
    CourseConfig {
        common: CommonConfig { port: 0 },
        service_name: "course-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        storage,
    }
}

/// Test application wrapper.
pub struct TestApp {
    pub address: String,
    pub http_port: u16,
    pub client: reqwest::Client,
    pub store: Arc<dyn CourseStore>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// POST a course and return the created JSON record.
    pub async fn create_course(&self, student_id: i32, name: &str) -> Value {
        let response = self
            .client
            .post(self.url("/course"))
            .json(&serde_json::json!({ "studentId": student_id, "name": name }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 201);
        response.json().await.expect("Failed to parse JSON")
    }
}

/// Spawn the app on a random port backed by a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_store(Arc::new(InMemoryCourseStore::new())).await
}

pub async fn spawn_app_with_store(store: Arc<dyn CourseStore>) -> TestApp {
    init_tracing();

    let app = Application::build_with_store(test_config(StorageConfig::Memory), store)
        .await
        .expect("Failed to build application");

    let http_port = app.http_port();
    let store = app.store();
    let address = format!("http://127.0.0.1:{}", http_port);

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    // Wait for the server to answer
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", address);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    TestApp {
        address,
        http_port,
        client,
        store,
    }
}
