// handlers/admin.rs - POST /admin/login, GET /admin/dashboard

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{verify_password, Claims};
use crate::database::repositories::AdminRepository;
use crate::error::ApiError;
use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: &'static str,
    pub user: Claims,
}

/// POST /admin/login - Exchange admin credentials for a JWT
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(body) = payload?;

    let email = body.email.as_deref().map(str::trim).unwrap_or_default();
    let password = body.password.as_deref().unwrap_or_default();
    let missing: Vec<&str> = [("email", email.is_empty()), ("password", password.is_empty())]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let admin = AdminRepository::new(state.db.pool())
        .find_by_email(email)
        .await?
        .filter(|admin| verify_password(password, &admin.password_hash))
        .ok_or_else(|| {
            warn!("Failed admin login for {}", email);
            ApiError::unauthorized("Invalid credentials")
        })?;

    let expiry_hours = state.config.security.jwt_expiry_hours;
    let claims = Claims::new(admin.email.clone(), admin.role.clone(), expiry_hours);
    let token = state.jwt.issue(&claims)?;
    info!("Admin {} logged in", admin.email);

    Ok(ApiResponse::success(LoginResponse {
        token,
        role: admin.role,
        expires_in: expiry_hours * 3600,
    }))
}

/// GET /admin/dashboard - Echo the verified session
pub async fn dashboard(Extension(admin): Extension<AdminUser>) -> ApiResult<DashboardResponse> {
    Ok(ApiResponse::success(DashboardResponse {
        message: "Welcome to Admin Dashboard",
        user: admin.claims,
    }))
}
