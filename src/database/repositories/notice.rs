use sqlx::PgPool;
use uuid::Uuid;

use super::Result;
use crate::database::manager::DatabaseError;
use crate::database::models::notice::Notice;

pub struct NoticeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NoticeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<Notice>> {
        let rows = sqlx::query_as::<_, Notice>(
            "SELECT id, title, file, created_at FROM notices ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(&self, title: &str, file: Option<&str>) -> Result<Notice> {
        let notice = sqlx::query_as::<_, Notice>(
            r#"
            INSERT INTO notices (id, title, file)
            VALUES ($1, $2, $3)
            RETURNING id, title, file, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(file)
        .fetch_one(self.pool)
        .await?;
        Ok(notice)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Notice> {
        sqlx::query_as::<_, Notice>(
            "DELETE FROM notices WHERE id = $1 RETURNING id, title, file, created_at",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Notice not found"))
    }
}
