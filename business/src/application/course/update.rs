use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::course::errors::CourseError;
use crate::domain::course::model::{self, Course, CourseProps};
use crate::domain::course::repository::CourseRepository;
use crate::domain::course::use_cases::update::{UpdateCourseParams, UpdateCourseUseCase};
use crate::domain::logger::Logger;

pub struct UpdateCourseUseCaseImpl {
    pub repository: Arc<dyn CourseRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateCourseUseCase for UpdateCourseUseCaseImpl {
    async fn execute(&self, params: UpdateCourseParams) -> Result<Course, CourseError> {
        self.logger
            .info(&format!("Updating course: {}", params.id));

        // Reject bad input before touching the store
        model::validate(&params.title, &params.author)?;

        let existing = self.repository.get_by_id(params.id).await?;

        let updated_course = existing.revise(CourseProps {
            title: params.title,
            description: params.description,
            author: params.author,
        });

        self.repository.update(&updated_course).await?;

        self.logger
            .info(&format!("Course updated: {}", updated_course.id));
        Ok(updated_course)
    }
}
