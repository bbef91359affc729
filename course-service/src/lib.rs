//! Course Service - CRUD over the course table.

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
        handlers::courses::list_courses,
        handlers::courses::get_course,
        handlers::courses::create_course,
        handlers::courses::update_course,
        handlers::courses::delete_course,
    ),
    components(schemas(models::Course)),
    tags(
        (name = "Courses", description = "Course records"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;
