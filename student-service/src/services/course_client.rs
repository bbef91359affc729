//! Client for course-service.

use crate::config::CourseServiceConfig;
use crate::services::metrics::UPSTREAM_REQUEST_DURATION;
use crate::services::upstream::{UpstreamError, UpstreamResponse};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};
use service_core::error::AppError;
use service_core::observability::TracedClientExt;
use tracing::instrument;

/// The two course-service calls the proxy makes.
///
/// Each call is a single request: no retries. A returned response may carry
/// any status; only a missing response is an error here.
#[async_trait]
pub trait CourseServiceClient: Send + Sync {
    /// `GET /course?studentId={student_id}`
    async fn list_courses_for_student(
        &self,
        student_id: i32,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// `POST /course` with `body` sent unchanged.
    async fn create_course(
        &self,
        body: Bytes,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError>;
}

/// reqwest-backed client. Every call is bounded by the configured timeout,
/// does not follow redirects, and is cancelled if the caller's future is
/// dropped.
#[derive(Clone)]
pub struct HttpCourseServiceClient {
    client: Client,
    courses_url: String,
}

impl HttpCourseServiceClient {
    pub fn new(settings: &CourseServiceConfig) -> Result<Self, AppError> {
        // Redirects are reported as unexpected statuses, never followed.
        let client = Client::builder()
            .timeout(settings.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                AppError::InternalError(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            courses_url: format!("{}/course", settings.url.trim_end_matches('/')),
        })
    }

    pub fn courses_url(&self) -> &str {
        &self.courses_url
    }

    async fn read(response: reqwest::Response) -> Result<UpstreamResponse, UpstreamError> {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        Ok(UpstreamResponse::new(status, &headers, bytes))
    }
}

#[async_trait]
impl CourseServiceClient for HttpCourseServiceClient {
    #[instrument(skip(self, request_id))]
    async fn list_courses_for_student(
        &self,
        student_id: i32,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let timer = UPSTREAM_REQUEST_DURATION
            .with_label_values(&["list_courses"])
            .start_timer();

        let response = self
            .client
            .traced_get(&self.courses_url)
            .query(&[("studentId", student_id)])
            .header(header::ACCEPT.as_str(), "application/json")
            .send_with_request_id(request_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to send GET request to {}", self.courses_url);
                UpstreamError::from(e)
            })?;

        let response = Self::read(response).await;
        timer.observe_duration();
        response
    }

    #[instrument(skip(self, body, request_id), fields(body_len = body.len()))]
    async fn create_course(
        &self,
        body: Bytes,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let timer = UPSTREAM_REQUEST_DURATION
            .with_label_values(&["create_course"])
            .start_timer();

        let response = self
            .client
            .traced_post(&self.courses_url)
            .header(header::CONTENT_TYPE.as_str(), "application/json")
            .header(header::ACCEPT.as_str(), "application/json")
            .body(body)
            .send_with_request_id(request_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to send POST request to {}", self.courses_url);
                UpstreamError::from(e)
            })?;

        let response = Self::read(response).await;
        timer.observe_duration();
        response
    }
}
