use ratatui::style::Modifier;

use super::{parse_markdown_inline, wrap_message};

fn text_of(spans: &[ratatui::text::Span<'_>]) -> String {
    spans.iter().map(|s| s.content.as_ref()).collect()
}

#[test]
fn wrap_message_respects_width() {
    let lines = wrap_message("the quick brown fox jumps", 10);
    assert!(lines.iter().all(|l| l.chars().count() <= 10));
    assert_eq!(lines.join(" "), "the quick brown fox jumps");
}

#[test]
fn wrap_message_keeps_paragraphs() {
    assert_eq!(
        wrap_message("Step 1\n\n\n\nStep 2\n", 40),
        vec!["Step 1", "", "Step 2"]
    );
}

#[test]
fn wrap_message_zero_width_keeps_line() {
    assert_eq!(wrap_message("x = 2", 0), vec!["x = 2"]);
}

#[test]
fn wrap_message_empty() {
    assert!(wrap_message("", 20).is_empty());
    assert!(wrap_message("\n\n", 20).is_empty());
}

#[test]
fn wrap_message_unicode_math() {
    let lines = wrap_message("√(b² - 4ac) ± π", 6);
    assert!(lines.iter().all(|l| l.chars().count() <= 6));
}

#[test]
fn markdown_plain_text() {
    let spans = parse_markdown_inline("Subtract 3 from both sides.");
    assert_eq!(spans.len(), 1);
    assert_eq!(text_of(&spans), "Subtract 3 from both sides.");
}

#[test]
fn markdown_bold() {
    let spans = parse_markdown_inline("The answer is **x = 2** here");
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[1].content, "x = 2");
    assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn markdown_code() {
    let spans = parse_markdown_inline("use `sqrt` here");
    assert_eq!(spans[1].content, "sqrt");
    assert!(spans[1].style.fg.is_some());
}

#[test]
fn markdown_unclosed_marker_is_literal() {
    let spans = parse_markdown_inline("2 ** 3 is 8");
    assert_eq!(text_of(&spans), "2 ** 3 is 8");
}

#[test]
fn markdown_heading() {
    let spans = parse_markdown_inline("## Solution");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].content, "Solution");
    assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn markdown_bullet_and_numbered() {
    assert_eq!(text_of(&parse_markdown_inline("- factor")), "• factor");
    assert_eq!(text_of(&parse_markdown_inline("* expand")), "• expand");
    assert_eq!(text_of(&parse_markdown_inline("2) divide")), "2. divide");
    assert_eq!(text_of(&parse_markdown_inline("10. check")), "10. check");
}

#[test]
fn markdown_number_without_marker_is_text() {
    assert_eq!(text_of(&parse_markdown_inline("3x = 6")), "3x = 6");
}
