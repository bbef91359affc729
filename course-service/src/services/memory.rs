//! In-process course store, used for local runs and tests.

use crate::models::Course;
use crate::services::store::CourseStore;
use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Course>,
    last_id: i32,
}

/// Course store kept in memory. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryCourseStore {
    table: RwLock<Table>,
}

impl InMemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn find_all(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_student_id(&self, student_id: i32) -> Result<Vec<Course>, AppError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|c| c.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, AppError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn insert(&self, course: Course) -> Result<Course, AppError> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::DatabaseError(anyhow::anyhow!("Course id space exhausted")))?;
        table.last_id = id;

        let created = course.with_id(id);
        table.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, course: Course) -> Result<Option<Course>, AppError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            *row = course.with_id(id);
            row.clone()
        }))
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), AppError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
