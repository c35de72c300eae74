//! Chat history: one bordered block per turn, display math set apart, and scrollbar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::segment::{SegmentKind, segment};
use crate::core::session::{Question, Turn};
use crate::core::typeset::typeset;

use super::super::app::App;
use super::super::constants::{ACCENT, ACCENT_SECONDARY};
use super::super::text::{parse_markdown_inline, wrap_message};

/// Gutter in front of each display math line.
const MATH_GUTTER: &str = "  ┃ ";

/// Repeat a character to fill width (approximate; chars may have different display widths).
fn repeat_char(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

/// "HH:MM" (UTC) for a unix timestamp.
fn format_time(unix_secs: u64) -> String {
    let hour = (unix_secs % 86400) / 3600;
    let min = (unix_secs % 3600) / 60;
    format!("{:02}:{:02}", hour, min)
}

/// What goes inside a message block.
enum BlockBody<'a> {
    Question(&'a Question),
    Reply { text: &'a str, failed: bool },
}

/// Parameters for rendering a message block.
struct MessageBlockParams<'a> {
    label: &'a str,
    body: BlockBody<'a>,
    wrap_width: usize,
    stream_cursor: bool,
    timestamp: Option<u64>,
}

/// Push wrapped plain text lines, styled as Markdown or in red for failures.
fn add_text_lines(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    content_width: usize,
    border_style: Style,
    failed: bool,
) {
    for chunk in wrap_message(text, content_width) {
        let mut spans = vec![Span::styled("│ ", border_style), Span::raw("  ")];
        if failed {
            spans.push(Span::styled(chunk, Style::default().fg(Color::Red)));
        } else {
            spans.extend(parse_markdown_inline(&chunk));
        }
        lines.push(Line::from(spans));
    }
}

/// Push a display math block: typeset, indented behind an accent gutter.
fn add_math_lines(
    lines: &mut Vec<Line<'static>>,
    latex: &str,
    content_width: usize,
    border_style: Style,
) {
    let math_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let math_width = content_width.saturating_sub(MATH_GUTTER.chars().count() - 2);
    let mut chunks = wrap_message(&typeset(latex), math_width);
    if chunks.is_empty() {
        chunks.push(String::new());
    }
    for chunk in chunks {
        lines.push(Line::from(vec![
            Span::styled("│ ", border_style),
            Span::styled(MATH_GUTTER, Style::default().fg(ACCENT)),
            Span::styled(chunk, math_style),
        ]));
    }
}

/// Add a You or Solver block with borders and separator.
fn add_message_block(lines: &mut Vec<Line<'static>>, p: MessageBlockParams<'_>) {
    let border_color = match p.body {
        BlockBody::Question(_) => Color::DarkGray,
        BlockBody::Reply { failed: true, .. } => Color::Red,
        BlockBody::Reply { .. } => ACCENT_SECONDARY,
    };
    let border_style = Style::default().fg(border_color);
    let content_width = p.wrap_width.saturating_sub(5);

    // Top border: "┌─ Label ───...──┐" or "┌─ Label 14:32 ───...──┐"
    let top_label = match p.timestamp {
        Some(ts) => format!("┌─ {} {} ", p.label, format_time(ts)),
        None => format!("┌─ {} ", p.label),
    };
    let top_trail_len = p.wrap_width.saturating_sub(top_label.chars().count() + 1);
    lines.push(Line::from(Span::styled(
        format!("{}{}┐", top_label, repeat_char('─', top_trail_len)),
        border_style,
    )));

    match p.body {
        BlockBody::Question(Question::Text(text)) => {
            add_text_lines(lines, text, content_width, border_style, false);
        }
        BlockBody::Question(Question::Image(image)) => {
            lines.push(Line::from(vec![
                Span::styled("│ ", border_style),
                Span::raw("  "),
                Span::styled(
                    format!("[image: {}]", image.label()),
                    Style::default()
                        .fg(ACCENT_SECONDARY)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
        BlockBody::Reply { text, failed } => {
            for seg in segment(text) {
                match seg.kind {
                    SegmentKind::PlainText => {
                        add_text_lines(lines, &seg.body, content_width, border_style, failed)
                    }
                    SegmentKind::DisplayMath => {
                        add_math_lines(lines, &seg.body, content_width, border_style)
                    }
                }
            }
        }
    }

    if p.stream_cursor {
        lines.push(Line::from(vec![
            Span::styled("│ ", border_style),
            Span::styled("  ▌ ", Style::default().fg(ACCENT_SECONDARY)),
        ]));
    }

    let bottom_line = format!("└{}┘", repeat_char('─', p.wrap_width.saturating_sub(2)));
    lines.push(Line::from(Span::styled(bottom_line, border_style)));
    lines.push(Line::from(""));
}

/// All history lines for the current session, including the reply being streamed.
fn history_lines(app: &App, wrap_width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, turn) in app.session.turns().iter().enumerate() {
        let timestamp = app
            .show_timestamps
            .then(|| app.session.timestamp(idx))
            .flatten();
        let (label, body) = match turn {
            Turn::User(question) => ("You", BlockBody::Question(question)),
            Turn::Assistant { reply, failed } => (
                "Solver",
                BlockBody::Reply {
                    text: reply,
                    failed: *failed,
                },
            ),
        };
        add_message_block(
            &mut lines,
            MessageBlockParams {
                label,
                body,
                wrap_width,
                stream_cursor: false,
                timestamp,
            },
        );
    }

    if let Some(partial) = app.streaming_reply.as_deref() {
        add_message_block(
            &mut lines,
            MessageBlockParams {
                label: "Solver",
                body: BlockBody::Reply {
                    text: partial,
                    failed: false,
                },
                wrap_width,
                stream_cursor: true,
                timestamp: None,
            },
        );
    }
    lines
}

pub(crate) fn draw_history(f: &mut Frame, app: &mut App, history_area: Rect) {
    let history_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(history_area);
    let text_area = history_chunks[0];
    let scrollbar_area = history_chunks[1];

    let lines = history_lines(app, text_area.width as usize);

    let total_lines = lines.len();
    let visible = text_area.height as usize;
    let max_scroll = total_lines.saturating_sub(visible.max(1));
    app.last_max_scroll = max_scroll;
    let scroll_pos = app.scroll_line().min(max_scroll);
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible).collect();

    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(scroll_pos)
        .content_length(total_lines);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(ACCENT_SECONDARY))
        .track_symbol(Some("│"));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::image::ImagePayload;
    use crate::core::solver::Reply;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn all_text(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(line_text).collect()
    }

    fn app() -> App {
        App::new("gpt-4o".to_string(), false)
    }

    #[test]
    fn empty_session_has_no_lines() {
        assert!(history_lines(&app(), 60).is_empty());
    }

    #[test]
    fn question_and_math_reply() {
        let mut app = app();
        app.ask("solve 2x = 4");
        app.finish_reply(Reply {
            text: "Divide by 2: $$x = \\frac{4}{2}$$ So x is 2.".to_string(),
            failed: false,
            usage: None,
        });
        let text = all_text(&history_lines(&app, 60));
        assert!(text[0].starts_with("┌─ You "));
        assert!(text.iter().any(|l| l.contains("solve 2x = 4")));
        assert!(text.iter().any(|l| l.starts_with("┌─ Solver ")));
        assert!(text.iter().any(|l| l == "│   ┃ x = 4/2"));
        assert!(text.iter().any(|l| l.contains("So x is 2.")));
    }

    #[test]
    fn empty_math_keeps_gutter_line() {
        let mut app = app();
        app.ask("q");
        app.finish_reply(Reply {
            text: "Before $$ $$ after".to_string(),
            failed: false,
            usage: None,
        });
        let text = all_text(&history_lines(&app, 60));
        let before = text.iter().position(|l| l.contains("Before")).expect("before");
        let after = text.iter().position(|l| l.contains("after")).expect("after");
        assert_eq!(after, before + 2);
        assert_eq!(text[before + 1], "│   ┃ ");
    }

    #[test]
    fn image_turn_shows_label() {
        let mut app = app();
        app.attach(ImagePayload {
            name: "eq.png".to_string(),
            mime_type: "image/png",
            bytes: vec![0; 4],
        });
        let text = all_text(&history_lines(&app, 60));
        assert!(text.iter().any(|l| l.contains("[image: eq.png (4 bytes)]")));
    }

    #[test]
    fn streaming_reply_has_cursor() {
        let mut app = app();
        app.ask("q");
        app.append_reply_chunk("Working");
        let text = all_text(&history_lines(&app, 60));
        assert!(text.iter().any(|l| l.contains("Working")));
        assert!(text.iter().any(|l| l.contains('▌')));
    }

    #[test]
    fn failed_reply_is_red() {
        let mut app = app();
        app.ask("q");
        app.finish_reply(Reply {
            text: "⚠️ OpenAI error: boom".to_string(),
            failed: true,
            usage: None,
        });
        let lines = history_lines(&app, 60);
        let warning = lines
            .iter()
            .find(|l| line_text(l).contains("boom"))
            .expect("warning line");
        assert!(
            warning
                .spans
                .iter()
                .any(|s| s.style.fg == Some(Color::Red) && s.content.contains("boom"))
        );
    }

    #[test]
    fn timestamps_in_labels() {
        let mut app = App::new("gpt-4o".to_string(), true);
        app.ask("q");
        let text = all_text(&history_lines(&app, 60));
        assert!(text[0].starts_with("┌─ You "));
        assert!(text[0].contains(':'));
    }

    #[test]
    fn format_time_hh_mm() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(3600 * 13 + 60 * 7 + 5), "13:07");
    }
}
