//! Render targets and input sources the controller is wired to.
//!
//! Whatever hosts the list (a page, a terminal, a test) implements these and
//! hands them to [`crate::CommentListController`]; nothing is looked up from
//! ambient state.

use std::sync::Arc;

use shared::domain::CommentId;

use crate::{notifier::NoticeKind, render::RenderedTable};

/// The results table body.
pub trait TableSurface: Send + Sync {
    /// Drops all current rows and shows `table` instead.
    fn replace_body(&self, table: &RenderedTable);

    /// Wires the delete trigger of every freshly rendered row. Called after
    /// each [`TableSurface::replace_body`]; previous bindings went away with
    /// the replaced rows.
    fn bind_delete_triggers(&self, ids: &[CommentId]);
}

/// The single toast element.
pub trait ToastSurface: Send + Sync {
    fn show(&self, message: &str, kind: NoticeKind);
    fn hide(&self);
}

/// The add-comment form: a category select, a text input and, when the host
/// offers one, a severity select.
pub trait AddCommentForm: Send + Sync {
    fn comment_type(&self) -> String;
    fn text(&self) -> String;
    fn severity(&self) -> Option<String> {
        None
    }
    fn reset(&self);
}

/// Guard in front of destructive actions.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Clone)]
pub struct Surfaces {
    pub table: Arc<dyn TableSurface>,
    pub toast: Arc<dyn ToastSurface>,
    pub add_form: Arc<dyn AddCommentForm>,
    pub confirm: Arc<dyn ConfirmPrompt>,
}
