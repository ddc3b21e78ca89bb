use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::course::errors::CourseError;
use crate::domain::course::repository::CourseRepository;
use crate::domain::course::use_cases::delete::{DeleteCourseParams, DeleteCourseUseCase};
use crate::domain::logger::Logger;

pub struct DeleteCourseUseCaseImpl {
    pub repository: Arc<dyn CourseRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteCourseUseCase for DeleteCourseUseCaseImpl {
    async fn execute(&self, params: DeleteCourseParams) -> Result<(), CourseError> {
        self.logger
            .info(&format!("Deleting course: {}", params.id));

        self.repository.delete(params.id).await?;

        self.logger.info(&format!("Course deleted: {}", params.id));
        Ok(())
    }
}
