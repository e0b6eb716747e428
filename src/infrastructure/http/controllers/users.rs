use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

use crate::{
    domain::entities::{UpdateProfileRequest, User},
    infrastructure::http::middleware::{ApiError, ApiResult, AppState, AuthenticatedUser},
    infrastructure::http::response::{Data, Success},
    shared::validation::parse_body,
};

// GET /api/users - admins see the users of their own team
pub async fn list_users(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
) -> ApiResult<Json<Data<Vec<User>>>> {
    auth_user.require_admin()?;
    let team_id = auth_user.team_id()?;

    let users = state.user_service.list_team_users(team_id).await?;
    Ok(Json(Data::new(users)))
}

// PATCH /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    body: Bytes,
) -> ApiResult<Json<Data<User>>> {
    let changes: UpdateProfileRequest = parse_body(&body)?;

    let user = state
        .user_service
        .update_profile(auth_user.user, changes)
        .await?;
    Ok(Json(Data::new(user)))
}

// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Success>> {
    auth_user.require_admin()?;

    if user_id == auth_user.id() {
        return Err(ApiError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    let team_id = auth_user.team_id()?;
    state.user_service.delete_team_user(&user_id, team_id).await?;

    tracing::info!("User {} deleted by admin {}", user_id, auth_user.id());
    Ok(Json(Success::ok()))
}
