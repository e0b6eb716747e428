use crate::domain::entities::Discussion;
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

/// Persistence for discussions. Every read that a handler exposes is
/// team-scoped; authorization stays with the caller.
#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    async fn create_discussion(&self, discussion: &Discussion) -> ApiResult<()>;
    async fn get_discussion_by_id(&self, id: &str) -> ApiResult<Option<Discussion>>;
    async fn get_discussion_by_id_and_team(
        &self,
        id: &str,
        team_id: &str,
    ) -> ApiResult<Option<Discussion>>;
    /// Newest first.
    async fn list_discussions_by_team(
        &self,
        team_id: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Discussion>>;
    async fn count_discussions_by_team(&self, team_id: &str) -> ApiResult<i64>;
    async fn update_discussion(&self, discussion: &Discussion) -> ApiResult<()>;
    /// Deletes the discussion and its comments. Returns false when nothing matched.
    async fn delete_discussion(&self, id: &str) -> ApiResult<bool>;
}
