mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use student_service::services::HttpCourseServiceClient;
use student_service::startup::{router, AppState};
use tower::ServiceExt;

#[tokio::test]
async fn openapi_document_lists_student_routes() {
    common::init_tracing();
    let config = common::test_config(&common::unreachable_url(), Duration::from_secs(1));
    let course_client = HttpCourseServiceClient::new(&config.course_service).unwrap();
    let app = router(AppState {
        config,
        course_client: Arc::new(course_client),
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: Value = serde_json::from_slice(&body).unwrap();

    let ops = doc["paths"]["/students/{student_id}/courses"]
        .as_object()
        .expect("student courses path should be documented");
    assert!(ops.contains_key("get"));
    assert!(ops.contains_key("post"));
    assert!(doc["components"]["schemas"]["Course"].is_object());
}
