use crate::domain::entities::Session;
use crate::domain::ports::session_repository::SessionRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use std::sync::Arc;
use std::time::Duration;

/// Generate secure random token for sessions (32 bytes = 64 hex characters)
pub fn generate_session_token() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

#[derive(Clone)]
pub struct SessionService {
    session_repo: Arc<dyn SessionRepository>,
    duration_hours: i64,
}

impl SessionService {
    pub fn new(session_repo: Arc<dyn SessionRepository>, duration_hours: i64) -> Self {
        Self {
            session_repo,
            duration_hours,
        }
    }

    /// Opens a fresh session for `user_id` with a newly generated token.
    pub async fn open(&self, user_id: &str) -> ApiResult<Session> {
        let session = Session::new(
            user_id.to_string(),
            generate_session_token(),
            self.duration_hours,
        );
        self.session_repo.create_session(&session).await?;
        Ok(session)
    }

    /// Looks up a live session. Expired sessions are deleted on sight.
    pub async fn resolve(&self, token: &str) -> ApiResult<Session> {
        let session = self
            .session_repo
            .get_session_by_token(token)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if session.is_expired() {
            if let Err(e) = self.session_repo.delete_session(token).await {
                tracing::warn!("Failed to drop expired session: {}", e);
            }
            return Err(ApiError::Unauthorized);
        }

        Ok(session)
    }

    pub async fn revoke(&self, token: &str) -> ApiResult<bool> {
        self.session_repo.delete_session(token).await
    }

    pub async fn sweep_expired(&self) -> ApiResult<u64> {
        self.session_repo.cleanup_expired_sessions().await
    }

    /// Periodically purges expired sessions until the runtime shuts down.
    pub fn spawn_cleanup_task(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                match service.sweep_expired().await {
                    Ok(0) => {}
                    Ok(removed) => tracing::info!("Removed {} expired session(s)", removed),
                    Err(e) => tracing::error!("Session cleanup failed: {}", e),
                }
            }
        })
    }
}
