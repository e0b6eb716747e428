use crate::domain::entities::Session;
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

/// Bearer sessions, looked up by their opaque token.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &Session) -> ApiResult<()>;
    /// Returns the stored session even when it has expired; the caller decides.
    async fn get_session_by_token(&self, token: &str) -> ApiResult<Option<Session>>;
    /// Returns false when no session carried `token`.
    async fn delete_session(&self, token: &str) -> ApiResult<bool>;
    /// Deletes every session at or past its expiry and returns how many went.
    async fn cleanup_expired_sessions(&self) -> ApiResult<u64>;
}
