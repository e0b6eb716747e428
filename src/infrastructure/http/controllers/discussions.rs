use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    domain::entities::{
        CreateDiscussionRequest, Discussion, DiscussionPage, UpdateDiscussionRequest,
    },
    infrastructure::http::middleware::{ApiError, ApiResult, AppState, AuthenticatedUser, FieldIssue},
    infrastructure::http::response::{Data, DiscussionEnvelope, Success},
    shared::validation::{parse_body, parse_query},
};

#[derive(Debug, Deserialize)]
pub struct DiscussionListParams {
    pub page: Option<String>,
}

impl DiscussionListParams {
    fn page(&self) -> ApiResult<i64> {
        match self.page.as_deref() {
            None | Some("") => Ok(1),
            Some(raw) => match raw.parse::<i64>() {
                Ok(page) if page >= 1 => Ok(page),
                _ => Err(ApiError::Validation(vec![FieldIssue::new(
                    "page",
                    "Must be a positive integer",
                )])),
            },
        }
    }
}

// GET /api/discussions?page=
pub async fn list_discussions(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    query: Result<Query<DiscussionListParams>, QueryRejection>,
) -> ApiResult<Json<DiscussionPage>> {
    let team_id = auth_user.team_id()?;
    let page = parse_query(query, "page")?.page()?;

    let discussions = state.discussion_service.list_page(team_id, page).await?;
    Ok(Json(discussions))
}

// GET /api/discussions/:id
pub async fn get_discussion(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(discussion_id): Path<String>,
) -> ApiResult<Json<Data<Discussion>>> {
    let team_id = auth_user.team_id()?;

    let discussion = state
        .discussion_service
        .get_in_team(&discussion_id, team_id)
        .await?;
    Ok(Json(Data::new(discussion)))
}

// POST /api/discussions
pub async fn create_discussion(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<DiscussionEnvelope>)> {
    let team_id = auth_user.team_id()?.to_string();
    let request: CreateDiscussionRequest = parse_body(&body)?;

    let discussion = Discussion::new(
        request.title.trim().to_string(),
        request.body,
        auth_user.id().to_string(),
        team_id,
    );
    let discussion = state.discussion_service.create_discussion(discussion).await?;

    Ok((StatusCode::CREATED, Json(DiscussionEnvelope { discussion })))
}

// PATCH /api/discussions/:id
pub async fn update_discussion(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(discussion_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Data<Discussion>>> {
    let team_id = auth_user.team_id()?;
    let discussion = state
        .discussion_service
        .get_in_team(&discussion_id, team_id)
        .await?;

    if !discussion.is_authored_by(auth_user.id()) {
        return Err(ApiError::Forbidden(
            "Only the author can edit this discussion".to_string(),
        ));
    }

    let changes: UpdateDiscussionRequest = parse_body(&body)?;
    let discussion = state
        .discussion_service
        .update_discussion(discussion, changes)
        .await?;
    Ok(Json(Data::new(discussion)))
}

// DELETE /api/discussions/:id
pub async fn delete_discussion(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(discussion_id): Path<String>,
) -> ApiResult<Json<Success>> {
    let team_id = auth_user.team_id()?;
    let discussion = state
        .discussion_service
        .get_in_team(&discussion_id, team_id)
        .await?;

    if !discussion.is_authored_by(auth_user.id()) {
        return Err(ApiError::Forbidden(
            "Only the author can delete this discussion".to_string(),
        ));
    }

    state
        .discussion_service
        .delete_discussion(&discussion.id)
        .await?;
    Ok(Json(Success::ok()))
}
