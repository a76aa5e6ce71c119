use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::CommentId,
    error::ErrorBody,
    protocol::{
        comment_types_route, comments_import_route, comments_route, Comment, CommentListBody,
        CommentUpdate, ImportSummary, NewComment,
    },
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub mod controller;
pub mod notifier;
pub mod render;
pub mod surface;

pub use controller::{
    AddOutcome, CommentListController, DeleteOutcome, ImportOutcome, LoadOutcome,
};
pub use notifier::{NoticeKind, Notifier, TOAST_DURATION};
pub use render::{CommentRow, RenderedTable};
pub use surface::{AddCommentForm, ConfirmPrompt, Surfaces, TableSurface, ToastSurface};

#[derive(Debug, Error)]
pub enum CommentsApiError {
    #[error("request to comments backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("comments backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("comments backend reported an error: {0}")]
    Backend(String),
    #[error("malformed response from comments backend: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),
    #[error("server_url must be an absolute http:// or https:// url, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("{0}")]
    Validation(String),
}

impl CommentsApiError {
    /// The backend answered with a well-formed body that carried no records:
    /// a non-success status or an explicit `error` field.
    pub fn is_backend_rejection(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Backend(_))
    }

    fn rejected(status: StatusCode, message: Option<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            }),
        }
    }
}

/// JSON-over-HTTP surface of the comments backend.
#[async_trait]
pub trait CommentsApi: Send + Sync {
    /// `None` lists every comment, `Some(type)` only that (already normalized)
    /// category.
    async fn list_comments(
        &self,
        comment_type: Option<&str>,
    ) -> Result<Vec<Comment>, CommentsApiError>;
    async fn create_comment(&self, new_comment: &NewComment) -> Result<(), CommentsApiError>;
    async fn delete_comment(&self, id: &CommentId) -> Result<(), CommentsApiError>;
    async fn get_comment(&self, id: &CommentId) -> Result<Comment, CommentsApiError>;
    async fn update_comment(
        &self,
        id: &CommentId,
        update: &CommentUpdate,
    ) -> Result<Comment, CommentsApiError>;
    async fn list_types(&self) -> Result<Vec<String>, CommentsApiError>;
    /// Replaces the stored comments with the backend's CSV seed file and
    /// returns the number of imported rows.
    async fn import_comments(&self) -> Result<u64, CommentsApiError>;
}

pub fn validate_update(update: &CommentUpdate) -> Result<(), CommentsApiError> {
    if update.is_empty() {
        return Err(CommentsApiError::Validation(
            "update must change at least one field".to_string(),
        ));
    }
    if update
        .comment
        .as_deref()
        .is_some_and(|text| text.trim().is_empty())
    {
        return Err(CommentsApiError::Validation(
            "comment text must not be empty".to_string(),
        ));
    }
    if update
        .comment_type
        .as_deref()
        .is_some_and(|comment_type| comment_type.trim().is_empty())
    {
        return Err(CommentsApiError::Validation(
            "comment type must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub struct HttpCommentsApi {
    http: Client,
    base_url: Url,
}

impl HttpCommentsApi {
    pub fn new(server_url: &str) -> Result<Self, CommentsApiError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, CommentsApiError> {
        let mut base_url = Url::parse(server_url.trim())?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(CommentsApiError::InvalidBaseUrl(server_url.to_string()));
        }
        // Relative joins below would otherwise drop the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, route: &str, segments: &[&str]) -> Result<Url, CommentsApiError> {
        let mut url = self.base_url.join(route.trim_start_matches('/'))?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|()| CommentsApiError::InvalidBaseUrl(self.base_url.to_string()))?
                .extend(segments);
        }
        Ok(url)
    }
}

async fn decode_success<T: DeserializeOwned>(response: Response) -> Result<T, CommentsApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .map(|body| body.error);
        return Err(CommentsApiError::rejected(status, message));
    }
    Ok(serde_json::from_slice(&bytes)?)
}

async fn ensure_success(response: Response) -> Result<(), CommentsApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let bytes = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .map(|body| body.error);
    Err(CommentsApiError::rejected(status, message))
}

#[async_trait]
impl CommentsApi for HttpCommentsApi {
    async fn list_comments(
        &self,
        comment_type: Option<&str>,
    ) -> Result<Vec<Comment>, CommentsApiError> {
        let url = match comment_type {
            Some(comment_type) => self.endpoint(comments_route(), &["type", comment_type])?,
            None => self.endpoint(comments_route(), &[])?,
        };
        debug!(%url, "listing comments");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        // Only a non-JSON body is malformed; any JSON answer without records
        // is a rejection.
        let body: CommentListBody = serde_json::from_slice(&bytes)?;

        if !status.is_success() {
            let message = body.error_message().map(str::to_string);
            warn!(status = status.as_u16(), ?message, "comment listing rejected");
            return Err(CommentsApiError::rejected(status, message));
        }

        match body {
            CommentListBody::Comments(comments) => Ok(comments),
            CommentListBody::Error(body) => {
                warn!(error = %body.error, "comment listing returned an error body");
                Err(CommentsApiError::Backend(body.error))
            }
            // An array that failed as records holds a malformed record.
            CommentListBody::Other(records @ serde_json::Value::Array(_)) => {
                Ok(serde_json::from_value(records)?)
            }
            CommentListBody::Other(other) => {
                let message = other
                    .get("error")
                    .map(|error| error.to_string())
                    .unwrap_or_else(|| "response carried no comments".to_string());
                warn!(%message, "comment listing returned no records");
                Err(CommentsApiError::Backend(message))
            }
        }
    }

    async fn create_comment(&self, new_comment: &NewComment) -> Result<(), CommentsApiError> {
        let url = self.endpoint(comments_route(), &[])?;
        debug!(%url, comment_type = %new_comment.comment_type, "creating comment");
        let response = self.http.post(url).json(new_comment).send().await?;
        ensure_success(response).await
    }

    async fn delete_comment(&self, id: &CommentId) -> Result<(), CommentsApiError> {
        let id = id.to_string();
        let url = self.endpoint(comments_route(), &[&id])?;
        debug!(%url, "deleting comment");
        let response = self.http.delete(url).send().await?;
        ensure_success(response).await
    }

    async fn get_comment(&self, id: &CommentId) -> Result<Comment, CommentsApiError> {
        let id = id.to_string();
        let url = self.endpoint(comments_route(), &[&id])?;
        debug!(%url, "fetching comment");
        let response = self.http.get(url).send().await?;
        decode_success(response).await
    }

    async fn update_comment(
        &self,
        id: &CommentId,
        update: &CommentUpdate,
    ) -> Result<Comment, CommentsApiError> {
        validate_update(update)?;
        let id = id.to_string();
        let url = self.endpoint(comments_route(), &[&id])?;
        debug!(%url, "updating comment");
        let response = self.http.put(url).json(update).send().await?;
        decode_success(response).await
    }

    async fn list_types(&self) -> Result<Vec<String>, CommentsApiError> {
        let url = self.endpoint(comment_types_route(), &[])?;
        debug!(%url, "listing comment types");
        let response = self.http.get(url).send().await?;
        decode_success(response).await
    }

    async fn import_comments(&self) -> Result<u64, CommentsApiError> {
        let url = self.endpoint(comments_import_route(), &[])?;
        debug!(%url, "importing comments");
        let response = self.http.post(url).send().await?;
        let summary: ImportSummary = decode_success(response).await?;
        debug!(rows = summary.rows, message = %summary.message, "comments imported");
        Ok(summary.rows)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
