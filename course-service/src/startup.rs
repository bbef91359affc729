//! Application startup and lifecycle management.

use crate::ApiDoc;
use crate::config::{CourseConfig, StorageConfig};
use crate::handlers::{self, courses};
use crate::services::{init_metrics, CourseStore, Database, InMemoryCourseStore};
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
    pub config: CourseConfig,
    pub store: Arc<dyn CourseStore>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application, opening the store named by the configuration.
    pub async fn build(config: CourseConfig) -> Result<Self, AppError> {
        let store: Arc<dyn CourseStore> = match &config.storage {
            StorageConfig::Postgres(database) => {
                let db = Database::new(
                    &database.url,
                    database.max_connections,
                    database.min_connections,
                )
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to connect to PostgreSQL");
                    e
                })?;

                db.run_migrations().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to run course migrations");
                    e
                })?;

                Arc::new(db)
            }
            StorageConfig::Memory => {
                tracing::warn!("Using in-memory course store; data is lost on restart");
                Arc::new(InMemoryCourseStore::new())
            }
        };

        Self::build_with_store(config, store).await
    }

    /// Build the application on top of an already constructed store.
    pub async fn build_with_store(
        config: CourseConfig,
        store: Arc<dyn CourseStore>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState {
            config: config.clone(),
            store,
        };

        // Port 0 picks a random port for tests
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %http_addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(http_port = http_port, "Course service listener bound");

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

    pub fn store(&self) -> Arc<dyn CourseStore> {
        self.state.store.clone()
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = router(self.state);

        tracing::info!(
            service = "course-service",
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

/// Routes for the course API plus health and metrics.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/course",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/course/:course_id",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
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
                    version = ?request.version(),
                )
            }),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
