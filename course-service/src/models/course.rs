//! Course model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A course owned by a student.
///
/// `id` is assigned by the store; whatever a client sends there is ignored on
/// create and overridden by the path id on update.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    #[schema(read_only, example = 1)]
    pub id: Option<i32>,
    #[schema(example = 1)]
    pub student_id: i32,
    #[sqlx(rename = "course_name")]
    #[schema(example = "Algebra")]
    pub name: String,
}

impl Course {
    /// Copy of this course stored under `id`.
    pub fn with_id(self, id: i32) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}
