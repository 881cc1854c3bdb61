use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: Uuid,
    pub title: String,
    pub img: String,
    pub created_at: DateTime<Utc>,
}
