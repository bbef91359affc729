//! PostgreSQL course store.

use crate::models::Course;
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::store::CourseStore;
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

const COURSE_COLUMNS: &str = "id, student_id, course_name";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "course-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl CourseStore for Database {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Course>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_all"])
            .start_timer();

        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM course ORDER BY id",
            COURSE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list courses: {}", e)))?;

        timer.observe_duration();
        Ok(courses)
    }

    #[instrument(skip(self), fields(student_id = %student_id))]
    async fn find_by_student_id(&self, student_id: i32) -> Result<Vec<Course>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_by_student_id"])
            .start_timer();

        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM course WHERE student_id = $1 ORDER BY id",
            COURSE_COLUMNS
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list student courses: {}", e))
        })?;

        timer.observe_duration();
        Ok(courses)
    }

    #[instrument(skip(self), fields(course_id = %id))]
    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_by_id"])
            .start_timer();

        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM course WHERE id = $1",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get course: {}", e)))?;

        timer.observe_duration();
        Ok(course)
    }

    #[instrument(skip(self), fields(course_id = %id))]
    async fn exists_by_id(&self, id: i32) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["exists_by_id"])
            .start_timer();

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM course WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to check course: {}", e))
            })?;

        timer.observe_duration();
        Ok(exists)
    }

    #[instrument(skip(self, course), fields(student_id = %course.student_id))]
    async fn insert(&self, course: Course) -> Result<Course, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert"])
            .start_timer();

        let created = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO course (student_id, course_name) VALUES ($1, $2) RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(course.student_id)
        .bind(&course.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create course: {}", e)))?;

        timer.observe_duration();
        Ok(created)
    }

    #[instrument(skip(self, course), fields(course_id = %id))]
    async fn update(&self, id: i32, course: Course) -> Result<Option<Course>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update"])
            .start_timer();

        let updated = sqlx::query_as::<_, Course>(&format!(
            "UPDATE course SET student_id = $2, course_name = $3 WHERE id = $1 RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(id)
        .bind(course.student_id)
        .bind(&course.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update course: {}", e)))?;

        timer.observe_duration();
        Ok(updated)
    }

    #[instrument(skip(self), fields(course_id = %id))]
    async fn delete_by_id(&self, id: i32) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_by_id"])
            .start_timer();

        sqlx::query("DELETE FROM course WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete course: {}", e))
            })?;

        timer.observe_duration();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }
}
