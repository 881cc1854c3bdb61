use sqlx::PgPool;
use uuid::Uuid;

use super::Result;
use crate::database::manager::{unique_violation, DatabaseError};
use crate::database::models::admin::Admin;

pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, email, password_hash, role, created_at FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(admin)
    }

    pub async fn create(&self, email: &str, password_hash: &str, role: &str) -> Result<Admin> {
        let created = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (id, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(self.pool)
        .await;

        match created {
            Ok(admin) => Ok(admin),
            Err(e) if unique_violation(&e).is_some() => Err(DatabaseError::Conflict(format!(
                "Admin {} already exists",
                email
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
