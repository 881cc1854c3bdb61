// handlers/visitors.rs - site visit counter

use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use crate::database::repositories::VisitorRepository;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VisitorTotal {
    pub total: i64,
}

/// POST /visitors - count a visit for today (UTC) and return the all-time total
pub async fn record(State(state): State<AppState>) -> ApiResult<VisitorTotal> {
    let repo = VisitorRepository::new(state.db.pool());
    repo.record_visit(Utc::now().date_naive()).await?;
    Ok(ApiResponse::success(VisitorTotal {
        total: repo.total().await?,
    }))
}

/// GET /visitors
pub async fn total(State(state): State<AppState>) -> ApiResult<VisitorTotal> {
    let total = VisitorRepository::new(state.db.pool()).total().await?;
    Ok(ApiResponse::success(VisitorTotal { total }))
}
