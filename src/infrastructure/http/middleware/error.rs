use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A single schema violation reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Validation failed ({} issue(s))", .0.len())]
    Validation(Vec<FieldIssue>),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ApiError::Validation(issues) => json!({
                "statusCode": status.as_u16(),
                "statusMessage": "Validation Error",
                "data": { "issues": issues },
            }),
            ApiError::Internal(detail) => {
                // Never leak internals to the caller
                tracing::error!("Internal server error: {}", detail);
                json!({
                    "statusCode": status.as_u16(),
                    "statusMessage": "Internal Server Error",
                })
            }
            ApiError::Unauthorized => json!({
                "statusCode": status.as_u16(),
                "statusMessage": "Unauthorized",
            }),
            ApiError::BadRequest(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => json!({
                "statusCode": status.as_u16(),
                "statusMessage": msg,
            }),
        };

        (status, Json(body)).into_response()
    }
}

// Convert from sqlx errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message();
                if message.contains("UNIQUE") || message.contains("unique") {
                    ApiError::Conflict("Resource already exists".to_string())
                } else {
                    ApiError::Internal(format!("Database error: {}", message))
                }
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for ApiError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        ApiError::Internal(format!("Migration error: {}", err))
    }
}

// Convert from argon2 errors
impl From<argon2::password_hash::Error> for ApiError {
    fn from(_: argon2::password_hash::Error) -> Self {
        ApiError::Internal("Password hashing error".to_string())
    }
}

impl From<time::error::Format> for ApiError {
    fn from(err: time::error::Format) -> Self {
        ApiError::Internal(format!("Timestamp formatting error: {}", err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_validation_display_counts_issues() {
        let err = ApiError::Validation(vec![
            FieldIssue::new("title", "Required"),
            FieldIssue::new("body", "Required"),
        ]);
        assert_eq!(err.to_string(), "Validation failed (2 issue(s))");
    }

    #[test]
    fn test_response_status_matches_variant() {
        let response = ApiError::Forbidden("Only the author may do this".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = ApiError::Internal("secret connection string".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
