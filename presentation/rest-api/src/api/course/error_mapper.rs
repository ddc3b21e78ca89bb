use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::course::errors::CourseError;

use crate::api::error::{ErrorResponse, INTERNAL_ERROR, IntoErrorResponse};

impl IntoErrorResponse for CourseError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match &self {
            CourseError::TitleTooShort | CourseError::AuthorRequired => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(self.to_string()))
            }
            CourseError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::new(self.to_string())),
            // Store details are logged by the repository and never leak to clients
            CourseError::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(INTERNAL_ERROR),
            ),
        }
    }
}
