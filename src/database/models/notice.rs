use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    /// Public path of the attached document, if any
    pub file: Option<String>,
    pub created_at: DateTime<Utc>,
}
