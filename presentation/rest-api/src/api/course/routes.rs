use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use poem::http::StatusCode;
use poem_openapi::{ApiResponse, OpenApi, param::Path, payload::Json};
use tokio::time::timeout;
use uuid::Uuid;

use business::domain::course::errors::CourseError;
use business::domain::course::use_cases::create::{CreateCourseParams, CreateCourseUseCase};
use business::domain::course::use_cases::delete::{DeleteCourseParams, DeleteCourseUseCase};
use business::domain::course::use_cases::get_all::GetAllCoursesUseCase;
use business::domain::course::use_cases::get_by_id::{GetCourseByIdParams, GetCourseByIdUseCase};
use business::domain::course::use_cases::update::{UpdateCourseParams, UpdateCourseUseCase};
use business::domain::logger::Logger;

use crate::api::course::dto::{
    CourseResponse, CreateCourseRequest, DeleteCourseResult, UpdateCourseRequest,
};
use crate::api::error::{
    ErrorResponse, INTERNAL_ERROR, INVALID_ID, INVALID_JSON, IntoErrorResponse,
};
use crate::api::tags::ApiTags;

/// Deadline for every use case call, counted from the moment the handler
/// starts it. It does not depend on the client connection.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

type Failure = (StatusCode, Json<ErrorResponse>);

pub struct CourseApi {
    create_use_case: Arc<dyn CreateCourseUseCase>,
    get_all_use_case: Arc<dyn GetAllCoursesUseCase>,
    get_by_id_use_case: Arc<dyn GetCourseByIdUseCase>,
    update_use_case: Arc<dyn UpdateCourseUseCase>,
    delete_use_case: Arc<dyn DeleteCourseUseCase>,
    logger: Arc<dyn Logger>,
}

impl CourseApi {
    pub fn new(
        create_use_case: Arc<dyn CreateCourseUseCase>,
        get_all_use_case: Arc<dyn GetAllCoursesUseCase>,
        get_by_id_use_case: Arc<dyn GetCourseByIdUseCase>,
        update_use_case: Arc<dyn UpdateCourseUseCase>,
        delete_use_case: Arc<dyn DeleteCourseUseCase>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            create_use_case,
            get_all_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            logger,
        }
    }

    /// Runs a use case under `REQUEST_TIMEOUT` and translates its failure.
    ///
    /// On expiry the use case future is dropped, which aborts the in-flight
    /// query and releases its pooled connection.
    async fn with_deadline<T, F>(&self, operation: &str, use_case: F) -> Result<T, Failure>
    where
        F: Future<Output = Result<T, CourseError>>,
    {
        match timeout(REQUEST_TIMEOUT, use_case).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                match &err {
                    e if e.is_validation() => self
                        .logger
                        .debug(&format!("{} rejected: {}", operation, e)),
                    CourseError::NotFound => self
                        .logger
                        .warn(&format!("{} failed: {}", operation, err)),
                    e => self.logger.error(&format!("{} failed: {}", operation, e)),
                }
                Err(err.into_error_response())
            }
            Err(_) => {
                self.logger.error(&format!(
                    "{} did not complete within {}s",
                    operation,
                    REQUEST_TIMEOUT.as_secs()
                ));
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR),
                ))
            }
        }
    }

    fn parse_id(&self, raw: &str) -> Result<Uuid, Json<ErrorResponse>> {
        Uuid::parse_str(raw).map_err(|e| {
            self.logger
                .debug(&format!("Invalid course ID format {:?}: {}", raw, e));
            ErrorResponse::new(INVALID_ID)
        })
    }
}

/// Course management API
///
/// Endpoints for creating, listing, updating, and deleting courses.
#[OpenApi]
impl CourseApi {
    /// Create a new course
    ///
    /// The identifier and timestamps are assigned by the server.
    #[oai(path = "/courses", method = "post", tag = "ApiTags::Courses")]
    async fn create_course(&self, body: Json<CreateCourseRequest>) -> CreateCourseResponse {
        let params = CreateCourseParams {
            title: body.0.title,
            description: body.0.description.unwrap_or_default(),
            author: body.0.author,
        };

        match self
            .with_deadline("create_course", self.create_use_case.execute(params))
            .await
        {
            Ok(course) => CreateCourseResponse::Created(Json(course.into())),
            Err((status, json)) => match status.as_u16() {
                400 => CreateCourseResponse::BadRequest(json),
                _ => CreateCourseResponse::InternalError(json),
            },
        }
    }

    /// List all courses
    ///
    /// Returns every course, newest first.
    #[oai(path = "/courses", method = "get", tag = "ApiTags::Courses")]
    async fn get_all_courses(&self) -> GetAllCoursesResponse {
        match self
            .with_deadline("get_all_courses", self.get_all_use_case.execute())
            .await
        {
            Ok(courses) => {
                let responses: Vec<CourseResponse> =
                    courses.into_iter().map(|c| c.into()).collect();
                GetAllCoursesResponse::Ok(Json(responses))
            }
            Err((_status, json)) => GetAllCoursesResponse::InternalError(json),
        }
    }

    /// Get a course by ID
    #[oai(path = "/courses/:id", method = "get", tag = "ApiTags::Courses")]
    async fn get_course_by_id(&self, id: Path<String>) -> GetCourseByIdResponse {
        let id = match self.parse_id(&id.0) {
            Ok(id) => id,
            Err(json) => return GetCourseByIdResponse::BadRequest(json),
        };

        match self
            .with_deadline(
                "get_course_by_id",
                self.get_by_id_use_case.execute(GetCourseByIdParams { id }),
            )
            .await
        {
            Ok(course) => GetCourseByIdResponse::Ok(Json(course.into())),
            Err((status, json)) => match status.as_u16() {
                404 => GetCourseByIdResponse::NotFound(json),
                _ => GetCourseByIdResponse::InternalError(json),
            },
        }
    }

    /// Update a course
    ///
    /// Replaces title, description and author. Partial updates are not
    /// supported: the body must pass the same validation as creation.
    #[oai(path = "/courses/:id", method = "put", tag = "ApiTags::Courses")]
    async fn update_course(
        &self,
        id: Path<String>,
        body: Json<UpdateCourseRequest>,
    ) -> UpdateCourseResponse {
        let id = match self.parse_id(&id.0) {
            Ok(id) => id,
            Err(json) => return UpdateCourseResponse::BadRequest(json),
        };

        let params = UpdateCourseParams {
            id,
            title: body.0.title,
            description: body.0.description.unwrap_or_default(),
            author: body.0.author,
        };

        match self
            .with_deadline("update_course", self.update_use_case.execute(params))
            .await
        {
            Ok(course) => UpdateCourseResponse::Ok(Json(course.into())),
            Err((status, json)) => match status.as_u16() {
                400 => UpdateCourseResponse::BadRequest(json),
                404 => UpdateCourseResponse::NotFound(json),
                _ => UpdateCourseResponse::InternalError(json),
            },
        }
    }

    /// Delete a course
    ///
    /// Permanently removes the course. Deleting an unknown ID is a 404.
    #[oai(path = "/courses/:id", method = "delete", tag = "ApiTags::Courses")]
    async fn delete_course(&self, id: Path<String>) -> DeleteCourseResponse {
        let id = match self.parse_id(&id.0) {
            Ok(id) => id,
            Err(json) => return DeleteCourseResponse::BadRequest(json),
        };

        match self
            .with_deadline(
                "delete_course",
                self.delete_use_case.execute(DeleteCourseParams { id }),
            )
            .await
        {
            Ok(()) => DeleteCourseResponse::Ok(Json(DeleteCourseResult { success: true })),
            Err((status, json)) => match status.as_u16() {
                404 => DeleteCourseResponse::NotFound(json),
                _ => DeleteCourseResponse::InternalError(json),
            },
        }
    }
}

/// Replaces the framework's plain-text rejection of unreadable bodies.
fn invalid_body(err: poem::Error) -> Json<ErrorResponse> {
    tracing::debug!(error = %err, "rejected request body");
    ErrorResponse::new(INVALID_JSON)
}

fn create_bad_request(err: poem::Error) -> CreateCourseResponse {
    CreateCourseResponse::BadRequest(invalid_body(err))
}

fn update_bad_request(err: poem::Error) -> UpdateCourseResponse {
    UpdateCourseResponse::BadRequest(invalid_body(err))
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "create_bad_request")]
pub enum CreateCourseResponse {
    #[oai(status = 201)]
    Created(Json<CourseResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(ApiResponse)]
pub enum GetAllCoursesResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<CourseResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(ApiResponse)]
pub enum GetCourseByIdResponse {
    #[oai(status = 200)]
    Ok(Json<CourseResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "update_bad_request")]
pub enum UpdateCourseResponse {
    #[oai(status = 200)]
    Ok(Json<CourseResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(ApiResponse)]
pub enum DeleteCourseResponse {
    #[oai(status = 200)]
    Ok(Json<DeleteCourseResult>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use business::domain::course::model::Course;
    use business::domain::course::repository::CourseRepository;
    use business::domain::errors::RepositoryError;
    use chrono::{DateTime, Utc};
    use logger::TracingLogger;
    use poem::middleware::Cors;
    use poem::test::{TestClient, TestResponse};
    use poem::{Endpoint, http::StatusCode};
    use serde_json::{Value, json};

    use crate::setup::dependency_injection::DependencyContainer;
    use crate::setup::server::build_app;

    /// Keeps rows newest first, like the `created_at DESC` query.
    #[derive(Default)]
    struct InMemoryCourseRepository {
        rows: Mutex<Vec<Course>>,
    }

    #[async_trait]
    impl CourseRepository for InMemoryCourseRepository {
        async fn create(&self, course: &Course) -> Result<(), RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|c| c.id == course.id) {
                return Err(RepositoryError::Duplicated);
            }
            rows.insert(0, course.clone());
            Ok(())
        }

        async fn get_all(&self) -> Result<Vec<Course>, RepositoryError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn get_by_id(&self, id: uuid::Uuid) -> Result<Course, RepositoryError> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }

        async fn update(&self, course: &Course) -> Result<(), RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|c| c.id == course.id)
                .ok_or(RepositoryError::NotFound)?;
            row.title = course.title.clone();
            row.description = course.description.clone();
            row.author = course.author.clone();
            row.updated_at = course.updated_at;
            Ok(())
        }

        async fn delete(&self, id: uuid::Uuid) -> Result<(), RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|c| c.id != id);
            if rows.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    /// Never answers, standing in for a hung database.
    struct StalledCourseRepository;

    #[async_trait]
    impl CourseRepository for StalledCourseRepository {
        async fn create(&self, _course: &Course) -> Result<(), RepositoryError> {
            std::future::pending().await
        }
        async fn get_all(&self) -> Result<Vec<Course>, RepositoryError> {
            std::future::pending().await
        }
        async fn get_by_id(&self, _id: uuid::Uuid) -> Result<Course, RepositoryError> {
            std::future::pending().await
        }
        async fn update(&self, _course: &Course) -> Result<(), RepositoryError> {
            std::future::pending().await
        }
        async fn delete(&self, _id: uuid::Uuid) -> Result<(), RepositoryError> {
            std::future::pending().await
        }
    }

    fn client_with(repository: Arc<dyn CourseRepository>) -> TestClient<impl Endpoint> {
        let container = DependencyContainer::with_repository(repository, Arc::new(TracingLogger));
        TestClient::new(build_app(container, Cors::new(), "http://localhost".to_string()))
    }

    fn client() -> TestClient<impl Endpoint> {
        client_with(Arc::new(InMemoryCourseRepository::default()))
    }

    async fn json_body(resp: TestResponse) -> Value {
        resp.0.into_body().into_json().await.unwrap()
    }

    fn timestamp(value: &Value) -> DateTime<Utc> {
        value.as_str().unwrap().parse().unwrap()
    }

    async fn create(cli: &TestClient<impl Endpoint>, title: &str, author: &str) -> Value {
        let resp = cli
            .post("/api/courses")
            .body_json(&json!({ "title": title, "author": author }))
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);
        json_body(resp).await
    }

    #[tokio::test]
    async fn should_create_course_with_generated_id() {
        let cli = client();

        let resp = cli
            .post("/api/courses")
            .body_json(&json!({ "title": "Intro to Go", "author": "Jane" }))
            .send()
            .await;

        resp.assert_status(StatusCode::CREATED);
        let content_type = resp.0.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("application/json"));
        let body = json_body(resp).await;
        let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
        assert!(!id.is_nil());
        assert_eq!(body["title"], "Intro to Go");
        assert_eq!(body["author"], "Jane");
        assert_eq!(body["description"], "");
        assert_eq!(timestamp(&body["created_at"]), timestamp(&body["updated_at"]));
    }

    #[tokio::test]
    async fn should_reject_short_title_without_persisting() {
        let cli = client();

        let resp = cli
            .post("/api/courses")
            .body_json(&json!({ "title": "Hi", "author": "Jane" }))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(json!({ "error": "title must be at least 3 characters" }))
            .await;

        let list = cli.get("/api/courses").send().await;
        list.assert_status_is_ok();
        list.assert_json(json!([])).await;
    }

    #[tokio::test]
    async fn should_reject_missing_author_as_validation_failure() {
        let cli = client();

        let resp = cli
            .post("/api/courses")
            .body_json(&json!({ "title": "Intro to Go" }))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(json!({ "error": "author is required" })).await;
    }

    #[tokio::test]
    async fn should_reject_malformed_json() {
        let cli = client();

        let resp = cli
            .post("/api/courses")
            .content_type("application/json")
            .body("{\"title\": ")
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(json!({ "error": "invalid JSON" })).await;
    }

    #[tokio::test]
    async fn should_list_courses_newest_first() {
        let cli = client();
        let first = create(&cli, "Intro to Go", "Jane").await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = create(&cli, "Advanced Rust", "Ferris").await;

        let resp = cli.get("/api/courses").send().await;

        resp.assert_status_is_ok();
        let body = json_body(resp).await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![second["id"].as_str().unwrap(), first["id"].as_str().unwrap()]
        );
    }

    #[tokio::test]
    async fn should_read_created_course_by_id() {
        let cli = client();
        let created = create(&cli, "Intro to Go", "Jane").await;
        let id = created["id"].as_str().unwrap();

        let resp = cli.get(format!("/api/courses/{}", id)).send().await;

        resp.assert_status_is_ok();
        assert_eq!(json_body(resp).await, created);
    }

    #[tokio::test]
    async fn should_update_course_and_keep_identity() {
        let cli = client();
        let created = create(&cli, "Intro to Go", "Jane").await;
        let id = created["id"].as_str().unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let resp = cli
            .put(format!("/api/courses/{}", id))
            .body_json(&json!({
                "title": "Intro to Rust",
                "description": "Ownership first",
                "author": "Ferris"
            }))
            .send()
            .await;

        resp.assert_status_is_ok();
        let body = json_body(resp).await;
        assert_eq!(body["id"], created["id"]);
        assert_eq!(body["created_at"], created["created_at"]);
        assert!(timestamp(&body["updated_at"]) > timestamp(&created["updated_at"]));
        assert_eq!(body["title"], "Intro to Rust");
        assert_eq!(body["description"], "Ownership first");
        assert_eq!(body["author"], "Ferris");

        let stored = json_body(cli.get(format!("/api/courses/{}", id)).send().await).await;
        assert_eq!(stored, body);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_unknown_course() {
        let cli = client();

        let resp = cli
            .put(format!("/api/courses/{}", Uuid::new_v4()))
            .body_json(&json!({ "title": "Intro to Go", "author": "Jane" }))
            .send()
            .await;

        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_json(json!({ "error": "course not found" })).await;
    }

    #[tokio::test]
    async fn should_validate_update_before_looking_up_course() {
        let cli = client();

        let resp = cli
            .put(format!("/api/courses/{}", Uuid::new_v4()))
            .body_json(&json!({ "title": "X", "author": "Y" }))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(json!({ "error": "title must be at least 3 characters" }))
            .await;
    }

    #[tokio::test]
    async fn should_reject_malformed_path_id() {
        let cli = client();

        let resp = cli
            .put("/api/courses/not-a-uuid")
            .body_json(&json!({ "title": "Intro to Go", "author": "Jane" }))
            .send()
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(json!({ "error": "invalid course ID format" }))
            .await;

        let resp = cli.delete("/api/courses/42").send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(json!({ "error": "invalid course ID format" }))
            .await;
    }

    #[tokio::test]
    async fn should_delete_once_then_report_not_found() {
        let cli = client();
        let created = create(&cli, "Intro to Go", "Jane").await;
        let path = format!("/api/courses/{}", created["id"].as_str().unwrap());

        let first = cli.delete(&path).send().await;
        first.assert_status_is_ok();
        first.assert_json(json!({ "success": true })).await;

        let lookup = cli.get(&path).send().await;
        lookup.assert_status(StatusCode::NOT_FOUND);

        let second = cli.delete(&path).send().await;
        second.assert_status(StatusCode::NOT_FOUND);
        second.assert_json(json!({ "error": "course not found" })).await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_fail_with_500_when_store_exceeds_deadline() {
        let cli = client_with(Arc::new(StalledCourseRepository));

        let resp = cli.get("/api/courses").send().await;

        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        resp.assert_json(json!({ "error": "internal server error" }))
            .await;
    }

    #[tokio::test]
    async fn should_report_health() {
        let cli = client();

        let resp = cli.get("/api/health").send().await;

        resp.assert_status_is_ok();
        let body = json_body(resp).await;
        assert_eq!(body["status"], "healthy");
    }
}
