use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::course::model::Course;

/// Missing `title`/`author` decode as empty strings so they fail validation
/// with a descriptive message instead of a generic decoding error.
#[derive(Debug, Clone, Object)]
pub struct CreateCourseRequest {
    /// Course title (at least 3 characters)
    #[oai(default)]
    pub title: String,
    /// Free-form description
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    /// Course author (required)
    #[oai(default)]
    pub author: String,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateCourseRequest {
    /// Course title (at least 3 characters)
    #[oai(default)]
    pub title: String,
    /// Free-form description; omitted clears it
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    /// Course author (required)
    #[oai(default)]
    pub author: String,
}

#[derive(Debug, Clone, Object)]
pub struct CourseResponse {
    /// Course unique identifier
    pub id: String,
    /// Course title
    pub title: String,
    /// Course description
    pub description: String,
    /// Course author
    pub author: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title,
            description: course.description,
            author: course.author,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct DeleteCourseResult {
    pub success: bool,
}
