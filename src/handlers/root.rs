// handlers/root.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "School Portal API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "admin": "/admin/login, /admin/dashboard",
                "students": "/students[/:id]",
                "results": "/results, /results/student/:roll/:classId/:examType/:year, /results/merit/:classId/:examType/:year",
                "teachers": "/teachers[/:id]",
                "notices": "/notices[/:id]",
                "gallery": "/gallery[/:id]",
                "visitors": "/visitors",
                "dashboard": "/dashboard/stats",
                "uploads": "/uploads/:file"
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
