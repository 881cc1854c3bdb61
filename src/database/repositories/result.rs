use sqlx::{types::Json, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::Result;
use crate::database::manager::DatabaseError;
use crate::database::models::result::{CohortKey, MarkSheet, NewResult, ResultRecord};

const COLUMNS: &str =
    "id, roll, student_name, class_id, exam_type, year, marks, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    pub class_id: Option<String>,
    pub exam_type: Option<String>,
    pub year: Option<i32>,
}

pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert unless a result already exists for the same roll, class, exam and year.
    ///
    /// Check and insert are one statement backed by the table's unique
    /// constraint, so two concurrent publishers cannot both succeed.
    pub async fn create(&self, new: &NewResult) -> Result<ResultRecord> {
        let inserted = sqlx::query_as::<_, ResultRecord>(&format!(
            r#"
            INSERT INTO results (id, roll, student_name, class_id, exam_type, year, marks)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT ON CONSTRAINT results_roll_class_exam_year_key DO NOTHING
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.roll)
        .bind(&new.student_name)
        .bind(&new.class_id)
        .bind(&new.exam_type)
        .bind(new.year)
        .bind(Json(&new.marks))
        .fetch_optional(self.pool)
        .await?;

        inserted.ok_or_else(|| DatabaseError::Conflict("Result already exists".to_string()))
    }

    pub async fn find_for_student(&self, roll: &str, key: &CohortKey) -> Result<ResultRecord> {
        sqlx::query_as::<_, ResultRecord>(&format!(
            r#"
            SELECT {COLUMNS} FROM results
            WHERE roll = $1 AND class_id = $2 AND exam_type = $3 AND year = $4
            "#
        ))
        .bind(roll)
        .bind(&key.class_id)
        .bind(&key.exam_type)
        .bind(key.year)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Result not found"))
    }

    /// Every result of a cohort, ordered by roll so listings are stable.
    pub async fn cohort(&self, key: &CohortKey) -> Result<Vec<ResultRecord>> {
        let rows = sqlx::query_as::<_, ResultRecord>(&format!(
            r#"
            SELECT {COLUMNS} FROM results
            WHERE class_id = $1 AND exam_type = $2 AND year = $3
            ORDER BY roll
            "#
        ))
        .bind(&key.class_id)
        .bind(&key.exam_type)
        .bind(key.year)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list(&self, filter: &ResultFilter) -> Result<Vec<ResultRecord>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM results WHERE TRUE"));

        if let Some(class_id) = &filter.class_id {
            query.push(" AND class_id = ").push_bind(class_id);
        }
        if let Some(exam_type) = &filter.exam_type {
            query.push(" AND exam_type = ").push_bind(exam_type);
        }
        if let Some(year) = filter.year {
            query.push(" AND year = ").push_bind(year);
        }
        query.push(" ORDER BY year DESC, class_id, exam_type, roll");

        let rows = query
            .build_query_as::<ResultRecord>()
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Replace the student name and/or mark sheet. The cohort key and roll are fixed.
    pub async fn update(
        &self,
        id: Uuid,
        student_name: Option<&str>,
        marks: Option<&MarkSheet>,
    ) -> Result<ResultRecord> {
        let updated = sqlx::query_as::<_, ResultRecord>(&format!(
            r#"
            UPDATE results
            SET student_name = COALESCE($2, student_name),
                marks = COALESCE($3, marks),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(student_name)
        .bind(marks.map(Json))
        .fetch_optional(self.pool)
        .await?;

        updated.ok_or_else(|| DatabaseError::not_found("Result not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let done = sqlx::query("DELETE FROM results WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Result not found"));
        }
        Ok(())
    }
}
