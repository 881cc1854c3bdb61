use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub designation: Option<String>,
    pub subject: Option<String>,
    pub qualification: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    /// Public path of the profile photo
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub name: String,
    pub details: TeacherChanges,
}

/// Teacher fields taken from a multipart form. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherChanges {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub subject: Option<String>,
    pub qualification: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
}
