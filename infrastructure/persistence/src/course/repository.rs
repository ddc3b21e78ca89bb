use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::course::model::Course;
use business::domain::course::repository::CourseRepository;
use business::domain::errors::RepositoryError;
use business::domain::logger::Logger;

use super::entity::CourseEntity;

pub struct CourseRepositoryPostgres {
    pool: PgPool,
    logger: Arc<dyn Logger>,
}

impl CourseRepositoryPostgres {
    pub fn new(pool: PgPool, logger: Arc<dyn Logger>) -> Self {
        Self { pool, logger }
    }

    fn database_error(&self, operation: &str, err: sqlx::Error) -> RepositoryError {
        self.logger
            .error(&format!("courses.{} failed: {}", operation, err));
        map_sqlx_error(err)
    }
}

/// Normalizes driver errors; a missing row becomes `NotFound`.
fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Duplicated,
        _ => RepositoryError::DatabaseError,
    }
}

#[async_trait]
impl CourseRepository for CourseRepositoryPostgres {
    async fn create(&self, course: &Course) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO courses (id, title, description, author, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.author)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| self.database_error("create", e))?;

        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Course>, RepositoryError> {
        let entities = sqlx::query_as::<_, CourseEntity>(
            "SELECT id, title, description, author, created_at, updated_at FROM courses ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| self.database_error("get_all", e))?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Course, RepositoryError> {
        let entity = sqlx::query_as::<_, CourseEntity>(
            "SELECT id, title, description, author, created_at, updated_at FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| self.database_error("get_by_id", e))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn update(&self, course: &Course) -> Result<(), RepositoryError> {
        // created_at is written once by create and never touched here
        let result = sqlx::query(
            r#"UPDATE courses
            SET title = $2, description = $3, author = $4, updated_at = $5
            WHERE id = $1"#,
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.author)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| self.database_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| self.database_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
