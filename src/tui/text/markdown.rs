//! Light Markdown styling for plain-text reply lines: headings, lists, **bold**, `code`.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::tui::constants::ACCENT;

/// Inline markers, in the order they are tried at the same position.
const INLINE_MARKERS: &[&str] = &["**", "`"];

/// Style of the text between a pair of markers.
fn marker_style(marker: &str) -> Style {
    if marker == "`" {
        Style::default().fg(ACCENT)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

/// Style one display line. Block markers are only recognized at the start of the line.
pub(crate) fn parse_markdown_inline(line: &str) -> Vec<Span<'static>> {
    let trimmed = line.trim_start();
    let marker = Style::default().fg(ACCENT);

    if trimmed.starts_with('#') {
        let heading = trimmed.trim_start_matches('#').trim_start();
        if heading.is_empty() {
            return Vec::new();
        }
        return vec![Span::styled(
            heading.to_string(),
            marker.add_modifier(Modifier::BOLD),
        )];
    }

    if let Some(item) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        let mut spans = vec![Span::styled("• ", marker)];
        spans.extend(inline_spans(item));
        return spans;
    }

    if let Some((number, item)) = numbered_item(trimmed) {
        let mut spans = vec![Span::styled(format!("{}. ", number), marker)];
        spans.extend(inline_spans(item));
        return spans;
    }

    inline_spans(line)
}

/// Split "12. rest" or "12) rest" into ("12", "rest").
fn numbered_item(s: &str) -> Option<(&str, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let (number, rest) = s.split_at(digits);
    let item = rest
        .strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))?;
    Some((number, item))
}

/// Bold and code spans. An unclosed marker is kept as literal text.
fn inline_spans(s: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = s;
    loop {
        let next = INLINE_MARKERS
            .iter()
            .filter_map(|&m| rest.find(m).map(|pos| (pos, m)))
            .min_by_key(|(pos, _)| *pos);
        let Some((pos, m)) = next else {
            if !rest.is_empty() {
                spans.push(Span::raw(rest.to_string()));
            }
            return spans;
        };
        if pos > 0 {
            spans.push(Span::raw(rest[..pos].to_string()));
        }
        let after = &rest[pos + m.len()..];
        match after.find(m) {
            Some(end) => {
                spans.push(Span::styled(after[..end].to_string(), marker_style(m)));
                rest = &after[end + m.len()..];
            }
            None => {
                spans.push(Span::raw(m.to_string()));
                rest = after;
            }
        }
    }
}
