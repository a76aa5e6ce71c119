use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Backend-assigned comment identifier. The API emits integers, but string
/// ids are accepted so the client never rejects a record over its key shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for CommentId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl FromStr for CommentId {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::EmptyCommentId);
        }
        Ok(raw
            .parse::<i64>()
            .map(Self::Numeric)
            .unwrap_or_else(|_| Self::Text(raw.to_string())))
    }
}

/// Normalizes a category filter: trimmed and lowercased, `None` when blank.
pub fn normalize_comment_type(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Uppercases the first character and keeps the rest as given.
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_id_accepts_numbers_and_strings() {
        let numeric: CommentId = serde_json::from_str("17").expect("numeric id");
        assert_eq!(numeric, CommentId::Numeric(17));

        let text: CommentId = serde_json::from_str("\"c-17\"").expect("text id");
        assert_eq!(text, CommentId::Text("c-17".to_string()));
        assert_eq!(text.to_string(), "c-17");
    }

    #[test]
    fn comment_id_parses_from_cli_input() {
        assert_eq!(" 42 ".parse::<CommentId>(), Ok(CommentId::Numeric(42)));
        assert_eq!(
            "abc".parse::<CommentId>(),
            Ok(CommentId::Text("abc".to_string()))
        );
        assert_eq!("  ".parse::<CommentId>(), Err(DomainError::EmptyCommentId));
    }

    #[test]
    fn comment_type_filter_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_comment_type("  Spelling "),
            Some("spelling".to_string())
        );
        assert_eq!(normalize_comment_type("   "), None);
    }

    #[test]
    fn capitalize_only_touches_first_character() {
        assert_eq!(capitalize("medium"), "Medium");
        assert_eq!(capitalize("hIGH"), "HIGH");
        assert_eq!(capitalize(""), "");
    }
}
