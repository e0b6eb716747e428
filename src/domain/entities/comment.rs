use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::infrastructure::http::middleware::error::FieldIssue;
use crate::shared::validation::{Issues, Validate};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub discussion_id: String,
    pub author_id: String,
    pub created_at: String,
}

impl Comment {
    pub fn new(body: String, discussion_id: String, author_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            body,
            discussion_id,
            author_id,
            created_at: super::timestamp_now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub body: String,
    pub discussion_id: String,
}

impl Validate for CreateCommentRequest {
    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Issues::new();
        issues
            .required("body", &self.body, 5_000)
            .required("discussionId", &self.discussion_id, 64);
        issues.into_vec()
    }
}
