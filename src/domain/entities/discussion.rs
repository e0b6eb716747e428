use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::infrastructure::http::middleware::error::FieldIssue;
use crate::shared::validation::{Issues, Validate};

pub const TITLE_MAX_LENGTH: usize = 200;
pub const BODY_MAX_LENGTH: usize = 20_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_id: String,
    pub team_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Discussion {
    /// Author and team always come from the creating session.
    pub fn new(title: String, body: String, author_id: String, team_id: String) -> Self {
        let now = super::timestamp_now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            body,
            author_id,
            team_id,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDiscussionRequest {
    pub title: String,
    pub body: String,
}

impl Validate for CreateDiscussionRequest {
    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Issues::new();
        issues
            .required("title", &self.title, TITLE_MAX_LENGTH)
            .required("body", &self.body, BODY_MAX_LENGTH);
        issues.into_vec()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDiscussionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Validate for UpdateDiscussionRequest {
    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Issues::new();
        issues
            .optional("title", self.title.as_deref(), TITLE_MAX_LENGTH)
            .optional("body", self.body.as_deref(), BODY_MAX_LENGTH);
        if self.title.is_none() && self.body.is_none() {
            issues.push("body", "Nothing to update");
        }
        issues.into_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };
        Self {
            page,
            total,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionPage {
    pub data: Vec<Discussion>,
    pub meta: PageMeta,
}
