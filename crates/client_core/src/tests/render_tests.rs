use super::*;

fn comment(id: i64, comment_type: &str, text: &str, severity: Option<&str>) -> Comment {
    Comment {
        id: CommentId::Numeric(id),
        comment_type: comment_type.to_string(),
        comment: text.to_string(),
        severity: severity.map(str::to_string),
        category: None,
        example_fix: None,
    }
}

#[test]
fn row_uses_lowercase_class_and_capitalized_label() {
    let row = CommentRow::from_comment(&comment(1, "TERMINOLOGY", "use 'crate'", Some("high")));

    assert_eq!(row.type_class, "terminology");
    assert_eq!(row.type_label, "Terminology");
    assert_eq!(row.severity, "High");
    assert_eq!(row.edit_href(), "/comments/1/edit");
}

#[test]
fn missing_or_blank_severity_renders_dash() {
    let absent = CommentRow::from_comment(&comment(1, "bug", "crashes", None));
    let blank = CommentRow::from_comment(&comment(2, "bug", "crashes", Some("")));

    assert_eq!(absent.severity, MISSING_SEVERITY);
    assert_eq!(blank.severity, MISSING_SEVERITY);
}

#[test]
fn row_markup_carries_pill_edit_link_and_delete_trigger() {
    let html = CommentRow::from_comment(&comment(1, "bug", "crashes", None)).to_html();

    assert!(html.starts_with("<tr><td>1</td>"));
    assert!(html.contains("<span class=\"pill bug\">Bug</span>"));
    assert!(html.contains("<td>crashes</td>"));
    assert!(html.contains("<td>—</td>"));
    assert!(html.contains("<a class=\"btn-edit\" href=\"/comments/1/edit\">Edit</a>"));
    assert!(html.contains("<button class=\"btn-delete\" data-id=\"1\">Delete</button>"));
}

#[test]
fn user_supplied_text_is_escaped() {
    let html = CommentRow::from_comment(&comment(
        3,
        "spelling\" onclick=\"x",
        "<script>alert('hi')</script> & more",
        Some("<b>high</b>"),
    ))
    .to_html();

    assert!(!html.contains("<script>"));
    assert!(html.contains("<td>&lt;script&gt;alert('hi')&lt;/script&gt; &amp; more</td>"));
    assert!(html.contains("class=\"pill spelling&quot; onclick=&quot;x\""));
    assert!(html.contains("&lt;b&gt;high&lt;/b&gt;"));
}

#[test]
fn untyped_comment_renders_empty_pill() {
    let row = CommentRow::from_comment(&comment(2, "", "imported", None));

    assert_eq!(row.type_label, "");
    assert!(row
        .to_html()
        .contains("<td><span class=\"pill \"></span></td><td>imported</td>"));
}

#[test]
fn edit_link_and_delete_trigger_quote_text_ids() {
    let mut quoted = comment(0, "bug", "crashes", None);
    quoted.id = CommentId::Text("a\"b".to_string());

    let html = CommentRow::from_comment(&quoted).to_html();

    assert!(html.contains("data-id=\"a&quot;b\""));
    assert!(html.contains("<td>a\"b</td>"));
}

#[test]
fn empty_slice_renders_single_spanning_placeholder() {
    let table = RenderedTable::from_comments(&[]);

    assert!(table.is_placeholder());
    assert_eq!(table.row_count(), 1);
    assert!(table.delete_targets().is_empty());
    assert_eq!(
        table.to_html(),
        "<tr><td colspan=\"5\" class=\"muted\">No comments found.</td></tr>"
    );
}

#[test]
fn rows_keep_backend_order() {
    let table = RenderedTable::from_comments(&[
        comment(2, "structure", "b", None),
        comment(1, "spelling", "a", None),
    ]);

    assert_eq!(
        table.delete_targets(),
        vec![CommentId::Numeric(2), CommentId::Numeric(1)]
    );
    assert_eq!(table.to_html().matches("<tr>").count(), 2);
}

#[test]
fn text_grid_aligns_columns() {
    let table = RenderedTable::from_comments(&[
        comment(1, "bug", "crashes", None),
        comment(12, "spelling", "teh", Some("low")),
    ]);

    let text = table.to_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ID  TYPE"));
    assert!(lines[1].starts_with("1   Bug       crashes  —"));
    assert!(lines[2].starts_with("12  Spelling  teh      Low"));
    assert!(lines[2].ends_with("/comments/12/edit"));
}

#[test]
fn text_placeholder_is_the_message() {
    assert_eq!(
        RenderedTable::placeholder(LOAD_ERROR_PLACEHOLDER).to_text(),
        "Error loading comments.\n"
    );
}
