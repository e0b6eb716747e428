use crate::domain::entities::Comment;
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, comment: &Comment) -> ApiResult<()>;
    async fn get_comment_by_id(&self, id: &str) -> ApiResult<Option<Comment>>;
    /// Only returns the comment when its discussion belongs to `team_id`.
    async fn get_comment_by_id_and_team(
        &self,
        id: &str,
        team_id: &str,
    ) -> ApiResult<Option<Comment>>;
    /// Oldest first.
    async fn list_comments_by_discussion(&self, discussion_id: &str) -> ApiResult<Vec<Comment>>;
    async fn delete_comment(&self, id: &str) -> ApiResult<bool>;
}
