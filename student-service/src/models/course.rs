use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Course as served by course-service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    #[schema(read_only, example = 4)]
    pub id: Option<i32>,
    #[schema(example = 1)]
    pub student_id: i32,
    #[schema(example = "Algebra")]
    pub name: String,
}
