//! Application startup and lifecycle management.

use crate::ApiDoc;
use crate::config::StudentConfig;
use crate::handlers::{self, courses};
use crate::services::{init_metrics, CourseServiceClient, HttpCourseServiceClient};
use axum::{middleware, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: StudentConfig,
    pub course_client: Arc<dyn CourseServiceClient>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with an HTTP client for the configured course-service.
    pub async fn build(config: StudentConfig) -> Result<Self, AppError> {
        let client = HttpCourseServiceClient::new(&config.course_service)?;

        tracing::info!(
            course_service_url = %client.courses_url(),
            timeout_ms = config.course_service.timeout.as_millis() as u64,
            "Course service client configured"
        );

        Self::build_with_client(config, Arc::new(client)).await
    }

    /// Build the application around an existing course-service client.
    pub async fn build_with_client(
        config: StudentConfig,
        course_client: Arc<dyn CourseServiceClient>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState {
            config: config.clone(),
            course_client,
        };

        // Port 0 picks a random port for tests
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %http_addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(http_port = http_port, "Student service listener bound");

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = router(self.state);

        tracing::info!(
            service = "student-service",
            version = env!("CARGO_PKG_VERSION"),
            http_port = self.http_port,
            "Service ready to accept connections"
        );

        axum::serve(self.http_listener, router).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/students/:student_id/courses",
            get(courses::list_student_courses).post(courses::create_student_course),
        )
        .layer(middleware::from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
