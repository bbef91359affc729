//! Student Service - student-scoped course operations, served by course-service.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::courses::list_student_courses,
        handlers::courses::create_student_course,
    ),
    components(schemas(models::Course)),
    tags(
        (name = "Student Courses", description = "Course operations scoped to one student"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;
