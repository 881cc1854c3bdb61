use sqlx::PgPool;

use super::Result;
use crate::database::models::stats::{ClassCount, DashboardStats, GenderCount};

pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, table: &'static str) -> Result<i64> {
        let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.pool)
            .await?;
        Ok(n)
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let total_students = self.count("students").await?;
        let total_teachers = self.count("teachers").await?;
        let total_results = self.count("results").await?;

        let gender_wise = sqlx::query_as::<_, GenderCount>(
            "SELECT gender, COUNT(*) AS count FROM students GROUP BY gender ORDER BY gender",
        )
        .fetch_all(self.pool)
        .await?;

        let class_wise = sqlx::query_as::<_, ClassCount>(
            "SELECT class_id, COUNT(*) AS students FROM students GROUP BY class_id ORDER BY class_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(DashboardStats {
            total_students,
            total_teachers,
            total_results,
            gender_wise,
            class_wise,
        })
    }
}
