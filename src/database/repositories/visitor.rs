use chrono::NaiveDate;
use sqlx::PgPool;

use super::Result;

pub struct VisitorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VisitorRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Bump the counter for `day`, creating it on the first visit.
    pub async fn record_visit(&self, day: NaiveDate) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO visitors (visit_date, count) VALUES ($1, 1)
            ON CONFLICT (visit_date) DO UPDATE SET count = visitors.count + 1
            "#,
        )
        .bind(day)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    pub async fn total(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(count), 0)::BIGINT FROM visitors")
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }
}
