use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::Course;

/// Persistence port for courses.
///
/// `create` and `update` are distinct: `update` never inserts and reports
/// `RepositoryError::NotFound` when no row carries the course id, as does
/// `delete`.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: &Course) -> Result<(), RepositoryError>;
    async fn get_all(&self) -> Result<Vec<Course>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Course, RepositoryError>;
    async fn update(&self, course: &Course) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
