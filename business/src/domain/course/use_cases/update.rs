use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::course::errors::CourseError;
use crate::domain::course::model::Course;

pub struct UpdateCourseParams {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: String,
}

#[async_trait]
pub trait UpdateCourseUseCase: Send + Sync {
    async fn execute(&self, params: UpdateCourseParams) -> Result<Course, CourseError>;
}
