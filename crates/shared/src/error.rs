use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload the comments backend sends instead of data, e.g.
/// `{"error": "No comments found for type 'praise'"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("comment id must not be empty")]
    EmptyCommentId,
}
