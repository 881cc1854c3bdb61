// handlers/dashboard.rs - GET /dashboard/stats

use axum::extract::State;

use crate::database::models::stats::DashboardStats;
use crate::database::repositories::StatsRepository;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn stats(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let stats = StatsRepository::new(state.db.pool()).dashboard().await?;
    Ok(ApiResponse::success(stats))
}
