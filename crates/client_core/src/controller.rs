//! Load, render and mutate the comment list.
//!
//! The backend is authoritative: every successful mutation is followed by a
//! full, unfiltered reload and the table is always replaced wholesale.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{normalize_comment_type, CommentId},
    protocol::NewComment,
};
use tracing::{debug, error, info, warn};

use crate::{
    notifier::Notifier,
    render::{RenderedTable, LOAD_ERROR_PLACEHOLDER},
    surface::{Surfaces, TableSurface},
    CommentsApi,
};

pub const NO_COMMENTS_TOAST: &str = "No comments found for selected type.";
pub const LOAD_ERROR_TOAST: &str = "Error loading comments.";
pub const MISSING_FIELDS_TOAST: &str = "Please fill all fields.";
pub const COMMENT_ADDED_TOAST: &str = "Comment added successfully!";
pub const ADD_FAILED_TOAST: &str = "Failed to add comment.";
pub const COMMENT_DELETED_TOAST: &str = "Comment deleted!";
pub const DELETE_FAILED_TOAST: &str = "Failed to delete comment.";
pub const IMPORT_FAILED_TOAST: &str = "Failed to import comments.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered(usize),
    /// Empty result or a backend rejection.
    NoComments,
    /// Transport failure or an unreadable response.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Invalid,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(u64),
    Cancelled,
    Failed,
}

pub struct CommentListController {
    api: Arc<dyn CommentsApi>,
    surfaces: Surfaces,
    notifier: Notifier,
}

impl CommentListController {
    pub fn new(api: Arc<dyn CommentsApi>, surfaces: Surfaces) -> Self {
        let notifier = Notifier::new(Arc::clone(&surfaces.toast));
        Self {
            api,
            surfaces,
            notifier,
        }
    }

    pub fn with_toast_duration(
        api: Arc<dyn CommentsApi>,
        surfaces: Surfaces,
        toast_duration: Duration,
    ) -> Self {
        let notifier = Notifier::with_duration(Arc::clone(&surfaces.toast), toast_duration);
        Self {
            api,
            surfaces,
            notifier,
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Fetches all comments, or those of one category, and replaces the
    /// table with the result.
    pub async fn load_comments(&self, type_filter: Option<&str>) -> LoadOutcome {
        let filter = type_filter.and_then(normalize_comment_type);
        debug!(filter = ?filter, "loading comments");

        match self.api.list_comments(filter.as_deref()).await {
            Ok(comments) if !comments.is_empty() => {
                info!(filter = ?filter, count = comments.len(), "rendering comments");
                self.render(&RenderedTable::from_comments(&comments));
                LoadOutcome::Rendered(comments.len())
            }
            Ok(_) => {
                info!(filter = ?filter, "no comments matched");
                self.show_no_comments();
                LoadOutcome::NoComments
            }
            Err(err) if err.is_backend_rejection() => {
                warn!(filter = ?filter, error = %err, "comment listing rejected");
                self.show_no_comments();
                LoadOutcome::NoComments
            }
            Err(err) => {
                error!(filter = ?filter, error = %err, "error loading comments");
                self.render(&RenderedTable::placeholder(LOAD_ERROR_PLACEHOLDER));
                self.notifier.error(LOAD_ERROR_TOAST);
                LoadOutcome::Failed
            }
        }
    }

    /// Submit handler of the filter form. A blank selection lists everything.
    pub async fn apply_filter(&self, selected_type: &str) -> LoadOutcome {
        self.load_comments(Some(selected_type)).await
    }

    /// Submit handler of the add-comment form.
    pub async fn add_comment(&self) -> AddOutcome {
        let form = &self.surfaces.add_form;
        let comment_type = form.comment_type();
        let text = form.text();

        if comment_type.trim().is_empty() || text.trim().is_empty() {
            debug!("add comment rejected: missing fields");
            self.notifier.error(MISSING_FIELDS_TOAST);
            return AddOutcome::Invalid;
        }

        let new_comment = NewComment {
            comment_type: comment_type.trim().to_string(),
            comment: text,
            severity: form
                .severity()
                .map(|severity| severity.trim().to_string())
                .filter(|severity| !severity.is_empty()),
        };

        match self.api.create_comment(&new_comment).await {
            Ok(()) => {
                info!(comment_type = %new_comment.comment_type, "comment added");
                form.reset();
                self.load_comments(None).await;
                self.notifier.success(COMMENT_ADDED_TOAST);
                AddOutcome::Added
            }
            Err(err) => {
                error!(error = %err, "failed to add comment");
                self.notifier.error(ADD_FAILED_TOAST);
                AddOutcome::Failed
            }
        }
    }

    /// Click handler of a row's delete trigger.
    pub async fn delete_comment(&self, id: &CommentId) -> DeleteOutcome {
        if !self
            .surfaces
            .confirm
            .confirm(&format!("Delete comment #{id}?"))
        {
            debug!(%id, "delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_comment(id).await {
            Ok(()) => {
                info!(%id, "comment deleted");
                self.load_comments(None).await;
                self.notifier.success(COMMENT_DELETED_TOAST);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                error!(%id, error = %err, "failed to delete comment");
                self.notifier.error(DELETE_FAILED_TOAST);
                DeleteOutcome::Failed
            }
        }
    }

    /// Replaces every stored comment with the backend's seed file, then
    /// reloads the unfiltered list.
    pub async fn import_comments(&self) -> ImportOutcome {
        if !self
            .surfaces
            .confirm
            .confirm("Replace all comments with the backend's comments.csv?")
        {
            debug!("import cancelled");
            return ImportOutcome::Cancelled;
        }

        match self.api.import_comments().await {
            Ok(rows) => {
                info!(rows, "comments imported");
                self.load_comments(None).await;
                self.notifier.success(format!("Imported {rows} comments."));
                ImportOutcome::Imported(rows)
            }
            Err(err) => {
                error!(error = %err, "failed to import comments");
                self.notifier.error(IMPORT_FAILED_TOAST);
                ImportOutcome::Failed
            }
        }
    }

    fn show_no_comments(&self) {
        self.render(&RenderedTable::from_comments(&[]));
        self.notifier.error(NO_COMMENTS_TOAST);
    }

    fn render(&self, table: &RenderedTable) {
        let surface: &dyn TableSurface = self.surfaces.table.as_ref();
        surface.replace_body(table);
        surface.bind_delete_triggers(&table.delete_targets());
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
