use crate::domain::entities::Session;
use crate::domain::ports::session_repository::SessionRepository;
use crate::infrastructure::http::middleware::error::ApiResult;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

fn row_to_session(row: &AnyRow) -> ApiResult<Session> {
    Ok(Session {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        token: row.try_get("token")?,
        expires_at: row.try_get::<i64, _>("expires_at")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl SessionRepository for Database {
    async fn create_session(&self, session: &Session) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, token, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.token)
        .bind(session.expires_at)
        .bind(&session.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Session opened for user {}", session.user_id);
        Ok(())
    }

    async fn get_session_by_token(&self, token: &str) -> ApiResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT id, user_id, token, expires_at, created_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn delete_session(&self, token: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn cleanup_expired_sessions(&self) -> ApiResult<u64> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
