use crate::{
    application::services::{
        AuthService, CommentService, DiscussionService, SessionService, TeamService, UserService,
    },
    domain::entities::{Session, User},
    infrastructure::http::middleware::error::{ApiError, ApiResult},
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub session_service: SessionService,
    pub user_service: UserService,
    pub team_service: TeamService,
    pub discussion_service: DiscussionService,
    pub comment_service: CommentService,
}

/// Extract and validate the session token from the Authorization header.
/// Anything other than a live `Bearer` session is rejected with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    let (session, user) = state.auth_service.resolve_session(&token).await?;

    request.extensions_mut().insert(AuthenticatedUser {
        user,
        session,
        token,
    });

    Ok(next.run(request).await)
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub session: Session,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    pub fn require_admin(&self) -> ApiResult<()> {
        if !self.is_admin() {
            return Err(ApiError::Forbidden("Requires ADMIN role".to_string()));
        }
        Ok(())
    }

    /// The caller's team scope; team-less users cannot use team resources.
    pub fn team_id(&self) -> ApiResult<&str> {
        self.user
            .team_id
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("User is not associated with a team".to_string()))
    }
}
