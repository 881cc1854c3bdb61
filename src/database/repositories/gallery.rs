use sqlx::PgPool;
use uuid::Uuid;

use super::Result;
use crate::database::manager::DatabaseError;
use crate::database::models::gallery::GalleryItem;

pub struct GalleryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GalleryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<GalleryItem>> {
        let rows = sqlx::query_as::<_, GalleryItem>(
            "SELECT id, title, img, created_at FROM gallery ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(&self, title: &str, img: &str) -> Result<GalleryItem> {
        let item = sqlx::query_as::<_, GalleryItem>(
            r#"
            INSERT INTO gallery (id, title, img)
            VALUES ($1, $2, $3)
            RETURNING id, title, img, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(img)
        .fetch_one(self.pool)
        .await?;
        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> Result<GalleryItem> {
        sqlx::query_as::<_, GalleryItem>(
            "DELETE FROM gallery WHERE id = $1 RETURNING id, title, img, created_at",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Image not found"))
    }
}
