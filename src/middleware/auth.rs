use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Admin identity extracted from a verified JWT
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub email: String,
    pub role: String,
    pub claims: Claims,
}

impl From<Claims> for AdminUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email.clone(),
            role: claims.role.clone(),
            claims,
        }
    }
}

/// Guards admin routes. No `Authorization` header is 401. A header that
/// does not carry a verifiable bearer token is 403.
pub async fn require_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers).map_err(|e| {
        warn!("Rejected admin request: {}", e.message());
        e
    })?;

    let claims = state.jwt.verify(token).map_err(|e| {
        warn!("JWT verification failed: {}", e);
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AdminUser::from(claims));
    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Unauthorized: No token provided"))?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::forbidden("Forbidden: Invalid token"))
}
