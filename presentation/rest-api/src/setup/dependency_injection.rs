use std::sync::Arc;

use persistence::course::repository::CourseRepositoryPostgres;

use business::application::course::create::CreateCourseUseCaseImpl;
use business::application::course::delete::DeleteCourseUseCaseImpl;
use business::application::course::get_all::GetAllCoursesUseCaseImpl;
use business::application::course::get_by_id::GetCourseByIdUseCaseImpl;
use business::application::course::update::UpdateCourseUseCaseImpl;
use business::domain::course::repository::CourseRepository;
use business::domain::logger::Logger;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub course_api: crate::api::course::routes::CourseApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, logger: Arc<dyn Logger>) -> Self {
        // Infrastructure adapters
        let course_repository = Arc::new(CourseRepositoryPostgres::new(pool, logger.clone()));

        Self::with_repository(course_repository, logger)
    }

    /// Wires the use cases and APIs on top of any repository implementation
    pub fn with_repository(
        course_repository: Arc<dyn CourseRepository>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let health_api = crate::api::health::routes::Api::new();

        // Course use cases
        let create_use_case = Arc::new(CreateCourseUseCaseImpl {
            repository: course_repository.clone(),
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetAllCoursesUseCaseImpl {
            repository: course_repository.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetCourseByIdUseCaseImpl {
            repository: course_repository.clone(),
            logger: logger.clone(),
        });
        let update_use_case = Arc::new(UpdateCourseUseCaseImpl {
            repository: course_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteCourseUseCaseImpl {
            repository: course_repository,
            logger: logger.clone(),
        });

        let course_api = crate::api::course::routes::CourseApi::new(
            create_use_case,
            get_all_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            logger,
        );

        Self {
            health_api,
            course_api,
        }
    }
}
