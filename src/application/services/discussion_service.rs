use crate::{
    domain::entities::{Discussion, DiscussionPage, PageMeta, UpdateDiscussionRequest},
    domain::ports::discussion_repository::DiscussionRepository,
    infrastructure::http::middleware::error::{ApiError, ApiResult, FieldIssue},
};
use std::sync::Arc;

pub const DISCUSSIONS_PER_PAGE: i64 = 10;

#[derive(Clone)]
pub struct DiscussionService {
    discussion_repo: Arc<dyn DiscussionRepository>,
}

impl DiscussionService {
    pub fn new(discussion_repo: Arc<dyn DiscussionRepository>) -> Self {
        Self { discussion_repo }
    }

    pub async fn create_discussion(&self, discussion: Discussion) -> ApiResult<Discussion> {
        self.discussion_repo.create_discussion(&discussion).await?;
        Ok(discussion)
    }

    /// Pages are 1-based; anything lower is treated as the first page.
    /// Pages whose offset does not fit in an `i64` are a validation issue.
    pub async fn list_page(&self, team_id: &str, page: i64) -> ApiResult<DiscussionPage> {
        let page = page.max(1);
        let offset = (page - 1).checked_mul(DISCUSSIONS_PER_PAGE).ok_or_else(|| {
            ApiError::Validation(vec![FieldIssue::new("page", "Page is out of range")])
        })?;

        let data = self
            .discussion_repo
            .list_discussions_by_team(team_id, DISCUSSIONS_PER_PAGE, offset)
            .await?;
        let total = self.discussion_repo.count_discussions_by_team(team_id).await?;

        Ok(DiscussionPage {
            data,
            meta: PageMeta::new(page, DISCUSSIONS_PER_PAGE, total),
        })
    }

    /// Not Found covers both missing discussions and those of other teams.
    pub async fn get_in_team(&self, id: &str, team_id: &str) -> ApiResult<Discussion> {
        self.discussion_repo
            .get_discussion_by_id_and_team(id, team_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Discussion {} not found", id)))
    }

    pub async fn update_discussion(
        &self,
        mut discussion: Discussion,
        changes: UpdateDiscussionRequest,
    ) -> ApiResult<Discussion> {
        if let Some(title) = changes.title {
            discussion.title = title.trim().to_string();
        }
        if let Some(body) = changes.body {
            discussion.body = body;
        }
        discussion.updated_at = crate::domain::entities::timestamp_now();

        self.discussion_repo.update_discussion(&discussion).await?;
        Ok(discussion)
    }

    pub async fn delete_discussion(&self, id: &str) -> ApiResult<()> {
        if !self.discussion_repo.delete_discussion(id).await? {
            return Err(ApiError::NotFound(format!("Discussion {} not found", id)));
        }
        Ok(())
    }
}
