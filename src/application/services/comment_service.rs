use crate::{
    domain::entities::Comment,
    domain::ports::comment_repository::CommentRepository,
    infrastructure::http::middleware::error::{ApiError, ApiResult},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct CommentService {
    comment_repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(comment_repo: Arc<dyn CommentRepository>) -> Self {
        Self { comment_repo }
    }

    pub async fn create_comment(&self, comment: Comment) -> ApiResult<Comment> {
        self.comment_repo.create_comment(&comment).await?;
        Ok(comment)
    }

    pub async fn list_for_discussion(&self, discussion_id: &str) -> ApiResult<Vec<Comment>> {
        self.comment_repo
            .list_comments_by_discussion(discussion_id)
            .await
    }

    pub async fn get_in_team(&self, id: &str, team_id: &str) -> ApiResult<Comment> {
        self.comment_repo
            .get_comment_by_id_and_team(id, team_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Comment {} not found", id)))
    }

    pub async fn delete_comment(&self, id: &str) -> ApiResult<()> {
        if !self.comment_repo.delete_comment(id).await? {
            return Err(ApiError::NotFound(format!("Comment {} not found", id)));
        }
        Ok(())
    }
}
