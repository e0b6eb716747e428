use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    domain::entities::{Comment, CreateCommentRequest},
    infrastructure::http::middleware::{ApiError, ApiResult, AppState, AuthenticatedUser, FieldIssue},
    infrastructure::http::response::{CommentEnvelope, Data, Success},
    shared::validation::{parse_body, parse_query},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListParams {
    pub discussion_id: Option<String>,
}

// GET /api/comments?discussionId=
pub async fn list_comments(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    query: Result<Query<CommentListParams>, QueryRejection>,
) -> ApiResult<Json<Data<Vec<Comment>>>> {
    let team_id = auth_user.team_id()?;
    let discussion_id = parse_query(query, "discussionId")?
        .discussion_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(vec![FieldIssue::new("discussionId", "Required")]))?;

    // Scope check: the discussion must be visible to the caller's team
    let discussion = state
        .discussion_service
        .get_in_team(&discussion_id, team_id)
        .await?;

    let comments = state
        .comment_service
        .list_for_discussion(&discussion.id)
        .await?;
    Ok(Json(Data::new(comments)))
}

// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<CommentEnvelope>)> {
    let team_id = auth_user.team_id()?;
    let request: CreateCommentRequest = parse_body(&body)?;

    let discussion = state
        .discussion_service
        .get_in_team(request.discussion_id.trim(), team_id)
        .await?;

    let comment = Comment::new(request.body, discussion.id, auth_user.id().to_string());
    let comment = state.comment_service.create_comment(comment).await?;

    Ok((StatusCode::CREATED, Json(CommentEnvelope { comment })))
}

// DELETE /api/comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<Success>> {
    let team_id = auth_user.team_id()?;
    let comment = state.comment_service.get_in_team(&comment_id, team_id).await?;

    if comment.author_id != auth_user.id() {
        return Err(ApiError::Forbidden(
            "Only the author can delete this comment".to_string(),
        ));
    }

    state.comment_service.delete_comment(&comment.id).await?;
    Ok(Json(Success::ok()))
}
