//! Storage seam for courses.

use crate::models::Course;
use async_trait::async_trait;
use service_core::error::AppError;

/// Primitives the course API needs from its backing table.
///
/// Implementations own their concurrency control; callers hold no locks.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Every stored course, in no particular order.
    async fn find_all(&self) -> Result<Vec<Course>, AppError>;

    /// Courses owned by `student_id`. Empty when there are none.
    async fn find_by_student_id(&self, student_id: i32) -> Result<Vec<Course>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, AppError>;

    async fn exists_by_id(&self, id: i32) -> Result<bool, AppError>;

    /// Store a new course under a freshly assigned id. `course.id` is ignored.
    async fn insert(&self, course: Course) -> Result<Course, AppError>;

    /// Overwrite the course stored under `id`. Returns `None` when no such row
    /// exists; nothing is created in that case.
    async fn update(&self, id: i32, course: Course) -> Result<Option<Course>, AppError>;

    /// Remove the course under `id`. Missing ids are not an error.
    async fn delete_by_id(&self, id: i32) -> Result<(), AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
