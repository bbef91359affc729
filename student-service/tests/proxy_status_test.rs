//! How course-service answers are translated, using a mocked course-service.

mod common;

use common::{spawn_app, spawn_app_with_timeout, unreachable_url};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn list_passes_courses_through() {
    let upstream = MockServer::start().await;
    let courses = json!([
        { "id": 1, "studentId": 7, "name": "Algebra" },
        { "id": 4, "studentId": 7, "name": "Chemistry" }
    ]);
    Mock::given(method("GET"))
        .and(path("/course"))
        .and(query_param("studentId", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(courses.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app.client.get(app.courses_url(7)).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, courses);
}

#[tokio::test]
async fn empty_upstream_list_is_ok() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app.client.get(app.courses_url(3)).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn upstream_404_is_an_empty_404() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "No courses found" })),
        )
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app.client.get(app.courses_url(2)).send().await.unwrap();

    assert_eq!(response.status(), 404);
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn upstream_client_errors_become_400_with_upstream_body() {
    for status in [400u16, 409, 422] {
        let upstream = MockServer::start().await;
        let error = json!({ "error": "Validation error", "details": format!("status {}", status) });
        Mock::given(method("POST"))
            .and(path("/course"))
            .respond_with(ResponseTemplate::new(status).set_body_json(error.clone()))
            .mount(&upstream)
            .await;

        let app = spawn_app(&upstream.uri()).await;
        let response = app
            .client
            .post(app.courses_url(1))
            .header("content-type", "application/json")
            .body(r#"{"studentId":1,"name":"Algebra"}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400, "upstream status {}", status);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, error);
    }
}

#[tokio::test]
async fn upstream_server_error_becomes_500_with_upstream_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app.client.get(app.courses_url(1)).send().await.unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), "maintenance");
}

#[tokio::test]
async fn upstream_redirect_is_not_followed() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/elsewhere")
                .set_body_string("moved"),
        )
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app.client.get(app.courses_url(1)).send().await.unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), "moved");
}

#[tokio::test]
async fn create_with_upstream_404_is_an_empty_404() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/course"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Not found" })))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app
        .client
        .post(app.courses_url(1))
        .header("content-type", "application/json")
        .body(r#"{"studentId":1,"name":"Algebra"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_upstream_server_error_is_500_with_upstream_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/course"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app
        .client
        .post(app.courses_url(1))
        .header("content-type", "application/json")
        .body(r#"{"studentId":1,"name":"Algebra"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), "database unavailable");
}

#[tokio::test]
async fn undecodable_success_body_becomes_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app.client.get(app.courses_url(1)).send().await.unwrap();

    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn unreachable_course_service_is_500() {
    let app = spawn_app(&unreachable_url()).await;

    let response = app.client.get(app.courses_url(1)).send().await.unwrap();
    assert_eq!(response.status(), 500);

    let response = app
        .client
        .post(app.courses_url(1))
        .header("content-type", "application/json")
        .body(r#"{"studentId":1,"name":"Algebra"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn slow_course_service_times_out_as_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&upstream)
        .await;

    let app = spawn_app_with_timeout(&upstream.uri(), Duration::from_millis(200)).await;
    let response = app.client.get(app.courses_url(1)).send().await.unwrap();

    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn create_forwards_body_unchanged_and_keeps_created_status() {
    let upstream = MockServer::start().await;
    // Unknown fields and a mismatched studentId are not the proxy's business.
    let raw = r#"{ "studentId": 9, "name": "Physics", "extra": true }"#;
    Mock::given(method("POST"))
        .and(path("/course"))
        .and(header("content-type", "application/json"))
        .and(body_string(raw))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("location", "12")
                .set_body_json(json!({ "id": 12, "studentId": 9, "name": "Physics" })),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app
        .client
        .post(app.courses_url(1))
        .header("content-type", "application/json")
        .body(raw)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    assert_eq!(response.headers()["location"], "12");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "id": 12, "studentId": 9, "name": "Physics" }));
}

#[tokio::test]
async fn request_id_is_forwarded_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course"))
        .and(header("x-request-id", "req-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app
        .client
        .get(app.courses_url(5))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn non_numeric_student_id_is_rejected_without_calling_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream.uri()).await;
    let response = app
        .client
        .get(app.url("/students/abc/courses"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}
