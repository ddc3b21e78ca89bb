use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use super::errors::CourseError;

const TITLE_MIN_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The client-editable fields of a course, shared by creation and revision.
pub struct CourseProps {
    pub title: String,
    pub description: String,
    pub author: String,
}

/// Checks the constraints every create and update must satisfy.
///
/// Title length counts characters, not bytes, of the raw value; whitespace
/// counts like any other character.
pub fn validate(title: &str, author: &str) -> Result<(), CourseError> {
    if title.chars().count() < TITLE_MIN_CHARS {
        return Err(CourseError::TitleTooShort);
    }

    if author.is_empty() {
        return Err(CourseError::AuthorRequired);
    }

    Ok(())
}

/// Current time at the precision the store keeps (microseconds), so the value
/// returned to a caller equals the value read back later.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl Course {
    /// Builds a brand new course. This is the only place an id is minted.
    pub fn new(props: CourseProps) -> Result<Self, CourseError> {
        validate(&props.title, &props.author)?;

        let now = now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: props.title,
            description: props.description,
            author: props.author,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrites the editable fields, keeping `id` and `created_at`.
    ///
    /// Callers run [`validate`] first; the update flow must reject bad input
    /// before it fetches the existing row.
    pub fn revise(self, props: CourseProps) -> Self {
        Self {
            title: props.title,
            description: props.description,
            author: props.author,
            updated_at: now(),
            ..self
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        title: String,
        description: String,
        author: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            author,
            created_at,
            updated_at,
        }
    }
}
