use axum::Json;
use serde_json::{json, Value};

use crate::infrastructure::http::middleware::ApiError;

// GET /api/healthcheck
pub async fn healthcheck() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
