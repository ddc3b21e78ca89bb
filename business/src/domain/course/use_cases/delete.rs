use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::course::errors::CourseError;

pub struct DeleteCourseParams {
    pub id: Uuid,
}

#[async_trait]
pub trait DeleteCourseUseCase: Send + Sync {
    async fn execute(&self, params: DeleteCourseParams) -> Result<(), CourseError>;
}
