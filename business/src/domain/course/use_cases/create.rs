use async_trait::async_trait;

use crate::domain::course::errors::CourseError;
use crate::domain::course::model::Course;

pub struct CreateCourseParams {
    pub title: String,
    pub description: String,
    pub author: String,
}

#[async_trait]
pub trait CreateCourseUseCase: Send + Sync {
    async fn execute(&self, params: CreateCourseParams) -> Result<Course, CourseError>;
}
