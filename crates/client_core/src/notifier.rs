//! Transient toast feedback.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::surface::ToastSurface;

pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    #[default]
    Success,
    Error,
}

impl NoticeKind {
    /// Style class of the toast element.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone)]
pub struct Notifier {
    surface: Arc<dyn ToastSurface>,
    duration: Duration,
}

impl Notifier {
    pub fn new(surface: Arc<dyn ToastSurface>) -> Self {
        Self::with_duration(surface, TOAST_DURATION)
    }

    pub fn with_duration(surface: Arc<dyn ToastSurface>, duration: Duration) -> Self {
        Self { surface, duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Shows `message` right away, replacing whatever toast is visible, and
    /// schedules this call's own dismissal. Earlier dismissal timers are not
    /// cancelled. Must be called inside a tokio runtime.
    pub fn notify(&self, message: impl Into<String>, kind: NoticeKind) -> JoinHandle<()> {
        let message = message.into();
        match kind {
            NoticeKind::Success => info!(kind = kind.as_str(), %message, "toast"),
            NoticeKind::Error => warn!(kind = kind.as_str(), %message, "toast"),
        }
        self.surface.show(&message, kind);

        let surface = Arc::clone(&self.surface);
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            surface.hide();
        })
    }

    pub fn success(&self, message: impl Into<String>) -> JoinHandle<()> {
        self.notify(message, NoticeKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> JoinHandle<()> {
        self.notify(message, NoticeKind::Error)
    }
}

#[cfg(test)]
#[path = "tests/notifier_tests.rs"]
mod tests;
