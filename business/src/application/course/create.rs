use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::course::errors::CourseError;
use crate::domain::course::model::{Course, CourseProps};
use crate::domain::course::repository::CourseRepository;
use crate::domain::course::use_cases::create::{CreateCourseParams, CreateCourseUseCase};
use crate::domain::logger::Logger;

pub struct CreateCourseUseCaseImpl {
    pub repository: Arc<dyn CourseRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateCourseUseCase for CreateCourseUseCaseImpl {
    async fn execute(&self, params: CreateCourseParams) -> Result<Course, CourseError> {
        self.logger
            .info(&format!("Creating course: {}", params.title));

        let course = Course::new(CourseProps {
            title: params.title,
            description: params.description,
            author: params.author,
        })?;

        self.repository.create(&course).await?;

        self.logger
            .info(&format!("Course created with id: {}", course.id));
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub CourseRepo {}

        #[async_trait]
        impl CourseRepository for CourseRepo {
            async fn create(&self, course: &Course) -> Result<(), RepositoryError>;
            async fn get_all(&self) -> Result<Vec<Course>, RepositoryError>;
            async fn get_by_id(&self, id: Uuid) -> Result<Course, RepositoryError>;
            async fn update(&self, course: &Course) -> Result<(), RepositoryError>;
            async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn params(title: &str, author: &str) -> CreateCourseParams {
        CreateCourseParams {
            title: title.to_string(),
            description: String::new(),
            author: author.to_string(),
        }
    }

    #[tokio::test]
    async fn should_create_course_when_input_is_valid() {
        let mut mock_repo = MockCourseRepo::new();
        mock_repo
            .expect_create()
            .withf(|course| course.title == "Intro to Go" && !course.id.is_nil())
            .times(1)
            .returning(|_| Ok(()));

        let use_case = CreateCourseUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(params("Intro to Go", "Jane")).await;

        assert!(result.is_ok());
        let course = result.unwrap();
        assert!(!course.id.is_nil());
        assert_eq!(course.title, "Intro to Go");
        assert_eq!(course.author, "Jane");
        assert_eq!(course.description, "");
    }

    #[tokio::test]
    async fn should_not_persist_when_title_is_too_short() {
        let mut mock_repo = MockCourseRepo::new();
        mock_repo.expect_create().never();

        let use_case = CreateCourseUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(params("Hi", "Jane")).await;

        assert!(matches!(result.unwrap_err(), CourseError::TitleTooShort));
    }

    #[tokio::test]
    async fn should_not_persist_when_author_is_empty() {
        let mut mock_repo = MockCourseRepo::new();
        mock_repo.expect_create().never();

        let use_case = CreateCourseUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(params("Intro to Go", "")).await;

        assert!(matches!(result.unwrap_err(), CourseError::AuthorRequired));
    }

    #[tokio::test]
    async fn should_propagate_repository_failure() {
        let mut mock_repo = MockCourseRepo::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(RepositoryError::Duplicated));

        let use_case = CreateCourseUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(params("Intro to Go", "Jane")).await;

        assert!(matches!(
            result.unwrap_err(),
            CourseError::Repository(RepositoryError::Duplicated)
        ));
    }
}
