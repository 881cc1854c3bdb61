// HTTP API Error Types
use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::services::merit::MeritError;
use crate::uploads::UploadError;

pub type FieldErrors = BTreeMap<String, String>;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<FieldErrors>,
    },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 422 Unprocessable Entity (well-formed request the rules cannot score)
    UnprocessableEntity {
        message: String,
        field_errors: FieldErrors,
    },

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::InvalidJson(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::UnprocessableEntity { message, .. } => message,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::UnprocessableEntity { .. } => "UNPROCESSABLE_ENTITY",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "message": self.message(),
            "code": self.error_code()
        });

        match self {
            ApiError::ValidationError {
                field_errors: Some(field_errors),
                ..
            }
            | ApiError::UnprocessableEntity { field_errors, .. } => {
                body["field_errors"] = json!(field_errors);
            }
            _ => {}
        }

        body
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: Option<FieldErrors>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    /// 400 naming every missing field.
    pub fn missing_fields(fields: &[&str]) -> Self {
        let field_errors = fields
            .iter()
            .map(|f| (f.to_string(), "This field is required".to_string()))
            .collect();
        ApiError::validation_error(
            format!("Missing required fields: {}", fields.join(", ")),
            Some(field_errors),
        )
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        ApiError::UnprocessableEntity {
            message: message.into(),
            field_errors,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

/// Parse a path id, answering 400 rather than the router's plain-text rejection.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid id: {}", raw)))
}

// Convert other error types to ApiError
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Conflict(msg) => ApiError::conflict(msg),
            DatabaseError::InvalidDatabaseUrl => {
                tracing::error!("Database URL is invalid");
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::Migration(e) => {
                tracing::error!("Migration error: {}", e);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut) | DatabaseError::Sqlx(sqlx::Error::Io(_)) => {
                tracing::error!("Database unreachable");
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::Sqlx(e) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", e);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<MeritError> for ApiError {
    fn from(err: MeritError) -> Self {
        match err {
            MeritError::MalformedMarks(subjects) => {
                ApiError::unprocessable_entity("Marks cannot be scored", subjects)
            }
            MeritError::DuplicateRoll(_) | MeritError::NotInCohort(_) => {
                tracing::error!("Cohort inconsistency: {}", err);
                ApiError::conflict(err.to_string())
            }
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Empty => ApiError::bad_request("Uploaded file is empty"),
            UploadError::InvalidPath(p) => {
                tracing::error!("Refusing upload path {}", p);
                ApiError::internal_server_error("Stored file path is invalid")
            }
            UploadError::Io(e) => {
                tracing::error!("Upload I/O error: {}", e);
                ApiError::internal_server_error("Failed to store file")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken(_) => ApiError::forbidden("Forbidden: Invalid token"),
            other => {
                tracing::error!("Auth error: {}", other);
                ApiError::internal_server_error("Authentication failure")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::validation_error(e.body_text(), None),
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::bad_request("Expected Content-Type: application/json")
            }
            other => ApiError::invalid_json(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge("Upload exceeds the size limit".to_string())
        } else {
            ApiError::bad_request(format!("Invalid multipart body: {}", err.body_text()))
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_has_envelope_fields() {
        let body = ApiError::not_found("Result not found").to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Result not found");
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body.get("field_errors").is_none());
    }

    #[test]
    fn malformed_marks_become_422_with_subjects() {
        let mut subjects = BTreeMap::new();
        subjects.insert("Math".to_string(), "written mark is required".to_string());
        let err = ApiError::from(MeritError::MalformedMarks(subjects));

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = err.to_json();
        assert_eq!(body["code"], "UNPROCESSABLE_ENTITY");
        assert_eq!(body["field_errors"]["Math"], "written mark is required");
    }

    #[test]
    fn cohort_lookup_errors_are_conflicts() {
        let dup = ApiError::from(MeritError::DuplicateRoll("7".into()));
        let missing = ApiError::from(MeritError::NotInCohort("7".into()));
        assert_eq!(dup.status_code(), StatusCode::CONFLICT);
        assert_eq!(missing.status_code(), StatusCode::CONFLICT);
        assert_ne!(dup.message(), "Fail");
    }

    #[test]
    fn database_errors_map_to_status() {
        assert_eq!(
            ApiError::from(DatabaseError::not_found("Student not found")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DatabaseError::Conflict("Result already exists".into())).status_code(),
            StatusCode::CONFLICT
        );
        let hidden = ApiError::from(DatabaseError::Sqlx(sqlx::Error::RowNotFound));
        assert_eq!(hidden.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hidden.message(), "Database error occurred");
        assert_eq!(
            ApiError::from(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn invalid_token_is_forbidden() {
        let err = ApiError::from(AuthError::InvalidToken("bad signature".into()));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn missing_fields_lists_each_field() {
        let err = ApiError::missing_fields(&["roll", "year"]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = err.to_json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"]["roll"], "This field is required");
        assert_eq!(body["field_errors"]["year"], "This field is required");
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
