use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{domain::CommentId, error::ErrorBody};

pub fn comments_route() -> &'static str {
    "/api/comments"
}

pub fn comments_import_route() -> &'static str {
    "/api/comments/load"
}

pub fn comment_types_route() -> &'static str {
    "/api/debug/types"
}

/// Navigation target of the per-row edit link. The page itself is served by
/// the backend.
pub fn edit_comment_route(id: &CommentId) -> String {
    format!("/comments/{id}/edit")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    /// Empty when the backend stored no type (sent as `null`).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comment_type: String,
    pub comment: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_fix: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub comment_type: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Partial update sent with `PUT /api/comments/{id}`; absent fields are left
/// untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl CommentUpdate {
    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.comment_type.is_none() && self.severity.is_none()
    }
}

/// Body of the list endpoints: the records, an error object, or any other
/// JSON value the backend answered with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentListBody {
    Comments(Vec<Comment>),
    Error(ErrorBody),
    Other(Value),
}

impl CommentListBody {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Comments(_) => None,
            Self::Error(body) => Some(&body.error),
            Self::Other(value) => value.get("error").and_then(Value::as_str),
        }
    }
}

/// Answer of `POST /api/comments/load`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentBody {
    Comment(Comment),
    Error(ErrorBody),
}
