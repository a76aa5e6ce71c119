//! Comment records to table rows.

use html_escape::{encode_double_quoted_attribute, encode_text};
use shared::{
    domain::{capitalize, CommentId},
    protocol::{edit_comment_route, Comment},
};

pub const TABLE_COLUMNS: usize = 5;
pub const MISSING_SEVERITY: &str = "—";
pub const NO_COMMENTS_PLACEHOLDER: &str = "No comments found.";
pub const LOAD_ERROR_PLACEHOLDER: &str = "Error loading comments.";

/// Display values of one comment, unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub id: CommentId,
    /// Lowercased category, used as the pill's style class.
    pub type_class: String,
    pub type_label: String,
    pub text: String,
    pub severity: String,
}

impl CommentRow {
    pub fn from_comment(comment: &Comment) -> Self {
        let type_class = comment.comment_type.to_lowercase();
        let type_label = capitalize(&type_class);
        let severity = comment
            .severity
            .as_deref()
            .filter(|severity| !severity.is_empty())
            .map(capitalize)
            .unwrap_or_else(|| MISSING_SEVERITY.to_string());

        Self {
            id: comment.id.clone(),
            type_class,
            type_label,
            text: comment.comment.clone(),
            severity,
        }
    }

    pub fn edit_href(&self) -> String {
        edit_comment_route(&self.id)
    }

    pub fn to_html(&self) -> String {
        let id = self.id.to_string();
        format!(
            "<tr>\
             <td>{}</td>\
             <td><span class=\"pill {}\">{}</span></td>\
             <td>{}</td>\
             <td>{}</td>\
             <td><div class=\"action-buttons\">\
             <a class=\"btn-edit\" href=\"{}\">Edit</a>\
             <button class=\"btn-delete\" data-id=\"{}\">Delete</button>\
             </div></td>\
             </tr>",
            encode_text(&id),
            encode_double_quoted_attribute(&self.type_class),
            encode_text(&self.type_label),
            encode_text(&self.text),
            encode_text(&self.severity),
            encode_double_quoted_attribute(&self.edit_href()),
            encode_double_quoted_attribute(&id),
        )
    }
}

/// Full content of the table body after one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedTable {
    Rows(Vec<CommentRow>),
    /// One row spanning every column.
    Placeholder(String),
}

impl RenderedTable {
    /// An empty slice renders the "no comments" placeholder.
    pub fn from_comments(comments: &[Comment]) -> Self {
        if comments.is_empty() {
            return Self::placeholder(NO_COMMENTS_PLACEHOLDER);
        }
        Self::Rows(comments.iter().map(CommentRow::from_comment).collect())
    }

    pub fn placeholder(message: impl Into<String>) -> Self {
        Self::Placeholder(message.into())
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Rows(rows) => rows.len(),
            Self::Placeholder(_) => 1,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    pub fn delete_targets(&self) -> Vec<CommentId> {
        match self {
            Self::Rows(rows) => rows.iter().map(|row| row.id.clone()).collect(),
            Self::Placeholder(_) => Vec::new(),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Rows(rows) => rows.iter().map(CommentRow::to_html).collect(),
            Self::Placeholder(message) => format!(
                "<tr><td colspan=\"{TABLE_COLUMNS}\" class=\"muted\">{}</td></tr>",
                encode_text(message)
            ),
        }
    }

    /// Plain-text grid for terminals.
    pub fn to_text(&self) -> String {
        let rows = match self {
            Self::Rows(rows) => rows,
            Self::Placeholder(message) => return format!("{message}\n"),
        };

        let header = ["ID", "TYPE", "COMMENT", "SEVERITY", "EDIT"];
        let cells: Vec<[String; TABLE_COLUMNS]> = rows
            .iter()
            .map(|row| {
                [
                    row.id.to_string(),
                    row.type_label.clone(),
                    row.text.clone(),
                    row.severity.clone(),
                    row.edit_href(),
                ]
            })
            .collect();

        let mut widths = header.map(|title| title.chars().count());
        for line in &cells {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header = header.map(str::to_string);
        for line in std::iter::once(&header).chain(&cells) {
            let padded: Vec<String> = line
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            out.push_str(padded.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
