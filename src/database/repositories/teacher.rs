use sqlx::PgPool;
use uuid::Uuid;

use super::Result;
use crate::database::manager::DatabaseError;
use crate::database::models::teacher::{NewTeacher, Teacher, TeacherChanges};

const COLUMNS: &str = "id, name, designation, subject, qualification, phone, email, bio, photo, \
     created_at, updated_at";

pub struct TeacherRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeacherRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Teacher>> {
        let rows = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {COLUMNS} FROM teachers ORDER BY created_at"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Teacher> {
        sqlx::query_as::<_, Teacher>(&format!("SELECT {COLUMNS} FROM teachers WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Teacher not found"))
    }

    pub async fn create(&self, new: &NewTeacher) -> Result<Teacher> {
        let d = &new.details;
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            r#"
            INSERT INTO teachers (id, name, designation, subject, qualification, phone, email, bio, photo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&d.designation)
        .bind(&d.subject)
        .bind(&d.qualification)
        .bind(&d.phone)
        .bind(&d.email)
        .bind(&d.bio)
        .bind(&d.photo)
        .fetch_one(self.pool)
        .await?;
        Ok(teacher)
    }

    pub async fn update(&self, id: Uuid, changes: &TeacherChanges) -> Result<Teacher> {
        sqlx::query_as::<_, Teacher>(&format!(
            r#"
            UPDATE teachers
            SET name = COALESCE($2, name),
                designation = COALESCE($3, designation),
                subject = COALESCE($4, subject),
                qualification = COALESCE($5, qualification),
                phone = COALESCE($6, phone),
                email = COALESCE($7, email),
                bio = COALESCE($8, bio),
                photo = COALESCE($9, photo),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.designation)
        .bind(&changes.subject)
        .bind(&changes.qualification)
        .bind(&changes.phone)
        .bind(&changes.email)
        .bind(&changes.bio)
        .bind(&changes.photo)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Teacher not found"))
    }

    /// Delete and return the removed row so its photo can be cleaned up.
    pub async fn delete(&self, id: Uuid) -> Result<Teacher> {
        sqlx::query_as::<_, Teacher>(&format!(
            "DELETE FROM teachers WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Teacher not found"))
    }
}
