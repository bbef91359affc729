//! Common test utilities for student-service integration tests.

#![allow(dead_code)]

use course_service::config::{CourseConfig, StorageConfig};
use course_service::services::InMemoryCourseStore;
use service_core::config::Config as CommonConfig;
use std::sync::{Arc, Once};
use std::time::Duration;
use student_service::config::{CourseServiceConfig, StudentConfig};
use student_service::startup::Application;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,student_service=debug,course_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn test_config(course_service_url: &str, timeout: Duration) -> StudentConfig {
    StudentConfig {
        common: CommonConfig { port: 0 },
        service_name: "student-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        course_service: CourseServiceConfig {
            url: course_service_url.to_string(),
            timeout,
        },
    }
}

/// Test application wrapper.
pub struct TestApp {
    pub address: String,
    pub http_port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn courses_url(&self, student_id: i32) -> String {
        self.url(&format!("/students/{}/courses", student_id))
    }
}

/// Spawn student-service pointing at `course_service_url`.
pub async fn spawn_app(course_service_url: &str) -> TestApp {
    spawn_app_with_timeout(course_service_url, Duration::from_secs(5)).await
}

pub async fn spawn_app_with_timeout(course_service_url: &str, timeout: Duration) -> TestApp {
    init_tracing();

    let app = Application::build(test_config(course_service_url, timeout))
        .await
        .expect("Failed to build application");

    let http_port = app.http_port();
    let address = format!("http://127.0.0.1:{}", http_port);

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    let client = wait_until_healthy(&address).await;

    TestApp {
        address,
        http_port,
        client,
    }
}

/// Spawn a real course-service on an in-memory store and return its base URL.
pub async fn spawn_course_service() -> String {
    init_tracing();

    let config = CourseConfig {
        common: CommonConfig { port: 0 },
        service_name: "course-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        storage: StorageConfig::Memory,
    };

    let app = course_service::startup::Application::build_with_store(
        config,
        Arc::new(InMemoryCourseStore::new()),
    )
    .await
    .expect("Failed to build course-service");

    let address = format!("http://127.0.0.1:{}", app.http_port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    wait_until_healthy(&address).await;
    address
}

/// A base URL nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind a free port");
    let port = listener
        .local_addr()
        .expect("Failed to read the free port")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

async fn wait_until_healthy(address: &str) -> reqwest::Client {
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", address);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    client
}
