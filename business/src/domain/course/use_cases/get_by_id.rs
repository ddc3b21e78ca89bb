use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::course::errors::CourseError;
use crate::domain::course::model::Course;

pub struct GetCourseByIdParams {
    pub id: Uuid,
}

#[async_trait]
pub trait GetCourseByIdUseCase: Send + Sync {
    async fn execute(&self, params: GetCourseByIdParams) -> Result<Course, CourseError>;
}
