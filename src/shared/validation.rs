//! Request body schema checks.
//!
//! Handlers receive the raw body and parse it only after the session and
//! role checks have passed, so a forbidden caller never learns anything
//! about the schema.

use axum::extract::{rejection::QueryRejection, Query};
use serde::de::DeserializeOwned;

use crate::infrastructure::http::middleware::error::{ApiError, ApiResult, FieldIssue};
use crate::shared::utils::email_validator::is_valid_email;

pub trait Validate {
    fn validate(&self) -> Vec<FieldIssue>;
}

/// Collects issues for one request body.
#[derive(Debug, Default)]
pub struct Issues(Vec<FieldIssue>);

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldIssue::new(field, message));
    }

    /// Trimmed value must be non-empty and at most `max` characters.
    pub fn required(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, "Required");
        } else if trimmed.chars().count() > max {
            self.push(field, format!("Must be at most {} characters", max));
        }
        self
    }

    pub fn optional(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(value) = value {
            self.required(field, value, max);
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.push(field, format!("Must be at most {} characters", max));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, "Required");
        } else if !is_valid_email(value) {
            self.push(field, "Invalid email address");
        }
        self
    }

    pub fn password(&mut self, field: &str, value: &str) -> &mut Self {
        let len = value.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            self.push(
                field,
                format!("Must be at least {} characters", MIN_PASSWORD_LENGTH),
            );
        } else if value.len() > MAX_PASSWORD_BYTES {
            self.push(field, format!("Must be at most {} bytes", MAX_PASSWORD_BYTES));
        }
        self
    }

    pub fn into_vec(self) -> Vec<FieldIssue> {
        self.0
    }
}

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Deserialize and validate a JSON body.
pub fn parse_body<T>(body: &[u8]) -> ApiResult<T>
where
    T: DeserializeOwned + Validate,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::Validation(vec![FieldIssue::new(
            "body",
            "Request body is required",
        )]));
    }

    let parsed: T = serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(vec![issue_from_serde(&e)]))?;

    let issues = parsed.validate();
    if !issues.is_empty() {
        tracing::debug!("Request body rejected with {} issue(s)", issues.len());
        return Err(ApiError::Validation(issues));
    }

    Ok(parsed)
}

/// Unwraps extracted query parameters. A query string axum could not
/// deserialize becomes a validation issue on `field`.
pub fn parse_query<T>(query: Result<Query<T>, QueryRejection>, field: &str) -> ApiResult<T> {
    match query {
        Ok(Query(params)) => Ok(params),
        Err(rejection) => {
            tracing::debug!("Query string rejected: {}", rejection.body_text());
            Err(ApiError::Validation(vec![FieldIssue::new(
                field,
                "Invalid query string",
            )]))
        }
    }
}

fn issue_from_serde(err: &serde_json::Error) -> FieldIssue {
    let message = err.to_string();

    // serde reports "missing field `title` at line 1 column 2"
    if let Some(rest) = message.strip_prefix("missing field `") {
        if let Some((field, _)) = rest.split_once('`') {
            return FieldIssue::new(field, "Required");
        }
    }

    FieldIssue::new("body", message)
}
