use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

pub const INVALID_JSON: &str = "invalid JSON";
pub const INVALID_ID: &str = "invalid course ID format";
pub const INTERNAL_ERROR: &str = "internal server error";

/// Body of every 4xx/5xx response: `{"error": "<message>"}`
#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: message.into(),
        })
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
