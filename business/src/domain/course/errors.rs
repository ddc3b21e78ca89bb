use crate::domain::errors::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error("title must be at least 3 characters")]
    TitleTooShort,
    #[error("author is required")]
    AuthorRequired,
    #[error("course not found")]
    NotFound,
    #[error("repository.persistence")]
    Repository(#[source] RepositoryError),
}

impl CourseError {
    /// True for failures caused by the submitted fields rather than by state.
    pub fn is_validation(&self) -> bool {
        matches!(self, CourseError::TitleTooShort | CourseError::AuthorRequired)
    }
}

impl From<RepositoryError> for CourseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => CourseError::NotFound,
            other => CourseError::Repository(other),
        }
    }
}
