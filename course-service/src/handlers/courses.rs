//! Course CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;
use utoipa::IntoParams;
use validator::Validate;

use crate::{models::Course, services::metrics::COURSES_CREATED, startup::AppState};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListCoursesQuery {
    /// Only return courses of this student.
    #[validate(range(min = 1))]
    #[param(minimum = 1, example = 1)]
    pub student_id: Option<i32>,
}

/// List all courses, or the courses of one student.
///
/// A student filter that matches nothing is a 404, whether the student is
/// unknown or simply has no courses.
#[utoipa::path(
    get,
    path = "/course",
    params(ListCoursesQuery),
    responses(
        (status = 200, description = "Matching courses", body = [Course]),
        (status = 404, description = "No courses for the requested student"),
        (status = 422, description = "studentId below 1")
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<Vec<Course>>, AppError> {
    query.validate()?;

    let Some(student_id) = query.student_id else {
        tracing::info!("Fetching all courses");
        return Ok(Json(state.store.find_all().await?));
    };

    tracing::info!(student_id, "Fetching courses for student");
    let courses = state.store.find_by_student_id(student_id).await?;

    if courses.is_empty() {
        tracing::error!(student_id, "No courses found for student");
        return Err(AppError::NotFound(anyhow::anyhow!(
            "No courses found for student {}",
            student_id
        )));
    }

    Ok(Json(courses))
}

/// Get one course by id.
#[utoipa::path(
    get,
    path = "/course/{course_id}",
    params(("course_id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<Json<Course>, AppError> {
    match state.store.find_by_id(course_id).await? {
        Some(course) => {
            tracing::info!(course_id, "Course found");
            Ok(Json(course))
        }
        None => {
            tracing::error!(course_id, "Course not found");
            Err(AppError::NotFound(anyhow::anyhow!(
                "Course {} not found",
                course_id
            )))
        }
    }
}

/// Create a course. The store picks the id; the `Location` header carries it.
#[utoipa::path(
    post,
    path = "/course",
    request_body = Course,
    responses(
        (status = 201, description = "Course created", body = Course,
            headers(("location" = String, description = "Id of the new course"))),
        (status = 422, description = "Malformed course body")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<Course>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Course>), AppError> {
    let course = state.store.insert(payload).await?;
    let course_id = course.id.ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("Store returned a course without an id"))
    })?;

    COURSES_CREATED.inc();
    tracing::info!(course_id, student_id = course.student_id, "New course added");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, course_id.to_string())],
        Json(course),
    ))
}

/// Replace an existing course. The path id wins over any id in the body, and
/// an unknown id is a 404 rather than an insert.
#[utoipa::path(
    put,
    path = "/course/{course_id}",
    params(("course_id" = i32, Path, description = "Course id")),
    request_body = Course,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
    Json(payload): Json<Course>,
) -> Result<Json<Course>, AppError> {
    if !state.store.exists_by_id(course_id).await? {
        tracing::error!(course_id, "Course not found for update");
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Course {} not found",
            course_id
        )));
    }

    // The row can vanish between the check and the write.
    let course = state
        .store
        .update(course_id, payload)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Course {} not found", course_id)))?;

    tracing::info!(course_id, "Course updated");
    Ok(Json(course))
}

/// Delete a course. Succeeds whether or not the id existed.
#[utoipa::path(
    delete,
    path = "/course/{course_id}",
    params(("course_id" = i32, Path, description = "Course id")),
    responses((status = 200, description = "Course deleted or already absent")),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.store.delete_by_id(course_id).await?;
    tracing::info!(course_id, "Course deleted");
    Ok(StatusCode::OK)
}
