//! Terminal-backed surfaces for the comment list controller.

use std::{
    io::{self, BufRead, Write},
    sync::Mutex,
};

use clap::ValueEnum;
use client_core::{
    AddCommentForm, ConfirmPrompt, NoticeKind, RenderedTable, TableSurface, ToastSurface,
};
use shared::domain::CommentId;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text columns.
    Text,
    /// Table-body markup, one `<tr>` per comment.
    Html,
}

pub struct TerminalTable {
    format: OutputFormat,
}

impl TerminalTable {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl TableSurface for TerminalTable {
    fn replace_body(&self, table: &RenderedTable) {
        let rendered = match self.format {
            OutputFormat::Text => table.to_text(),
            OutputFormat::Html => format!("{}\n", table.to_html()),
        };
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(rendered.as_bytes());
        let _ = stdout.flush();
    }

    fn bind_delete_triggers(&self, ids: &[CommentId]) {
        // Rows are deleted with `moderator delete <id>`; nothing to wire here.
        debug!(rows = ids.len(), "rendered deletable rows");
    }
}

pub struct TerminalToast;

impl ToastSurface for TerminalToast {
    fn show(&self, message: &str, kind: NoticeKind) {
        eprintln!("[{}] {message}", kind.as_str());
    }

    fn hide(&self) {}
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct FormFields {
    comment_type: String,
    text: String,
    severity: Option<String>,
}

/// Add-comment form filled from command-line flags.
#[derive(Default)]
pub struct PresetForm {
    fields: Mutex<FormFields>,
}

impl PresetForm {
    pub fn new(comment_type: String, text: String, severity: Option<String>) -> Self {
        Self {
            fields: Mutex::new(FormFields {
                comment_type,
                text,
                severity,
            }),
        }
    }

    fn with_fields<T>(&self, read: impl FnOnce(&FormFields) -> T) -> T {
        match self.fields.lock() {
            Ok(guard) => read(&guard),
            Err(poisoned) => read(&poisoned.into_inner()),
        }
    }
}

impl AddCommentForm for PresetForm {
    fn comment_type(&self) -> String {
        self.with_fields(|fields| fields.comment_type.clone())
    }

    fn text(&self) -> String {
        self.with_fields(|fields| fields.text.clone())
    }

    fn severity(&self) -> Option<String> {
        self.with_fields(|fields| fields.severity.clone())
    }

    fn reset(&self) {
        match self.fields.lock() {
            Ok(mut guard) => *guard = FormFields::default(),
            Err(poisoned) => *poisoned.into_inner() = FormFields::default(),
        }
    }
}

/// Asks on stderr and reads the answer from stdin, unless `--yes` was given.
pub struct StdinConfirm {
    assume_yes: bool,
}

impl StdinConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_affirmative(&answer)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_form_resets_every_field() {
        let form = PresetForm::new(
            "spelling".to_string(),
            "teh -> the".to_string(),
            Some("low".to_string()),
        );
        assert_eq!(form.comment_type(), "spelling");
        assert_eq!(form.severity().as_deref(), Some("low"));

        form.reset();
        assert_eq!(form.comment_type(), "");
        assert_eq!(form.text(), "");
        assert_eq!(form.severity(), None);
    }

    #[test]
    fn only_yes_answers_confirm() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("no"));
    }

    #[test]
    fn assume_yes_skips_the_prompt() {
        assert!(StdinConfirm::new(true).confirm("Delete comment #1?"));
    }
}
