//! Success envelopes shared by the handlers and the typed client.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Comment, Discussion};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionEnvelope {
    pub discussion: Discussion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEnvelope {
    pub comment: Comment,
}
