use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use crate::{
    domain::entities::{AuthResponse, LoginRequest, RegisterRequest, User},
    infrastructure::http::middleware::{ApiResult, AppState, AuthenticatedUser},
    infrastructure::http::response::{Data, Success},
    shared::validation::parse_body,
};

// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let request: RegisterRequest = parse_body(&body)?;
    let result = state.auth_service.register(request).await?;

    Ok((StatusCode::CREATED, Json(result.into_response()?)))
}

// POST /api/auth/login
pub async fn login(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<AuthResponse>> {
    let request: LoginRequest = parse_body(&body)?;
    let result = state.auth_service.login(request).await?;

    Ok(Json(result.into_response()?))
}

// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
) -> ApiResult<Json<Success>> {
    state.auth_service.logout(&auth_user.token).await?;

    tracing::info!("User logged out: id={}", auth_user.id());
    Ok(Json(Success::ok()))
}

// GET /api/auth/me
pub async fn me(
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
) -> ApiResult<Json<Data<User>>> {
    Ok(Json(Data::new(auth_user.user)))
}
