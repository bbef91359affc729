//! Student-scoped course handlers, each backed by one course-service call.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use service_core::observability::extract_request_id;

use crate::{
    models::Course,
    services::{record_upstream_request, UpstreamError},
    startup::AppState,
};

const LIST_COURSES: &str = "list_courses";
const CREATE_COURSE: &str = "create_course";

/// Log and count how an upstream call ended.
fn report<T>(operation: &str, student_id: i32, result: &Result<T, UpstreamError>) {
    let outcome = match result {
        Ok(_) => {
            tracing::info!(student_id, operation, "Courses data found for student");
            "success"
        }
        Err(err @ UpstreamError::NotFound) => {
            tracing::error!(student_id, operation, "No courses data found for student");
            err.outcome()
        }
        Err(err @ UpstreamError::ClientError { .. }) => {
            tracing::error!(student_id, operation, error = %err, "Bad request for student");
            err.outcome()
        }
        Err(err) => {
            tracing::error!(student_id, operation, error = %err, "Something went wrong for student");
            err.outcome()
        }
    };

    record_upstream_request(operation, outcome);
}

/// List the courses of a student.
///
/// An empty upstream list is a 200 here; only an upstream 404 is a 404.
#[utoipa::path(
    get,
    path = "/students/{student_id}/courses",
    params(("student_id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Courses of the student", body = [Course]),
        (status = 404, description = "course-service has no courses for the student"),
        (status = 400, description = "course-service rejected the request"),
        (status = 500, description = "course-service failed or could not be reached")
    ),
    tag = "Student Courses"
)]
pub async fn list_student_courses(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Json<Vec<Course>>, UpstreamError> {
    tracing::info!(student_id, "Getting courses for student");
    let request_id = extract_request_id(&headers);

    let result = match state
        .course_client
        .list_courses_for_student(student_id, request_id.as_deref())
        .await
    {
        Ok(upstream) => upstream.decode::<Vec<Course>>(),
        Err(e) => Err(e),
    };

    report(LIST_COURSES, student_id, &result);
    Ok(Json(result?))
}

/// Create a course for a student.
///
/// The body goes upstream untouched. On success the upstream status and
/// `Location` are kept.
#[utoipa::path(
    post,
    path = "/students/{student_id}/courses",
    params(("student_id" = i32, Path, description = "Student id")),
    request_body = Course,
    responses(
        (status = 201, description = "Course created by course-service", body = Course,
            headers(("location" = String, description = "Id of the new course"))),
        (status = 404, description = "course-service answered 404"),
        (status = 400, description = "course-service rejected the course"),
        (status = 500, description = "course-service failed or could not be reached")
    ),
    tag = "Student Courses"
)]
pub async fn create_student_course(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, UpstreamError> {
    tracing::info!(student_id, "Creating course for student");
    let request_id = extract_request_id(&headers);

    let result = match state
        .course_client
        .create_course(body, request_id.as_deref())
        .await
    {
        Ok(upstream) => {
            let status = upstream.status;
            let location = upstream.location.clone();
            upstream
                .decode::<Course>()
                .map(|course| (status, location, course))
        }
        Err(e) => Err(e),
    };

    report(CREATE_COURSE, student_id, &result);
    let (status, location, course) = result?;

    let mut response = (status, Json(course)).into_response();
    if let Some(location) = location {
        response.headers_mut().insert(header::LOCATION, location);
    }
    Ok(response)
}
