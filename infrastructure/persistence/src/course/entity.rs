use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::course::model::Course;

#[derive(Debug, FromRow)]
pub struct CourseEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourseEntity {
    pub fn into_domain(self) -> Course {
        Course::from_repository(
            self.id,
            self.title,
            self.description,
            self.author,
            self.created_at,
            self.updated_at,
        )
    }
}
