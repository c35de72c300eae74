//! Input line and bottom bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::App;
use super::super::constants::ACCENT;
use super::super::shortcuts::labels;

/// Prefix whose argument is a password.
const ADMIN_PREFIX: &str = "/admin ";

/// Input as displayed: everything after `/admin ` is masked, one bullet per char.
fn masked_input(input: &str) -> String {
    match input.strip_prefix(ADMIN_PREFIX) {
        Some(secret) => {
            let mut shown = String::from(ADMIN_PREFIX);
            shown.extend(std::iter::repeat_n('•', secret.chars().count()));
            shown
        }
        None => input.to_string(),
    }
}

/// Draw the input block and set cursor position. Long input scrolls to keep the end visible.
pub(crate) fn draw_input_block(f: &mut Frame, app: &App, input_area: Rect) {
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.is_streaming() {
            Color::DarkGray
        } else {
            ACCENT
        }));
    let inner = input_block.inner(input_area);
    let width = inner.width as usize;

    let input_chars = app.input.chars().count();
    let content = if app.input.is_empty() {
        Span::styled(
            "Ask a math question, or /image <path>",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        let skip = (input_chars + 1).saturating_sub(width);
        Span::raw(masked_input(&app.input).chars().skip(skip).collect::<String>())
    };
    f.render_widget(
        Paragraph::new(Line::from(content))
            .block(input_block)
            .style(Style::default().fg(Color::White)),
        input_area,
    );
    let cursor_col = input_chars.min(width.saturating_sub(1)) as u16;
    f.set_cursor_position(Position::new(inner.x + cursor_col, inner.y));
}

/// Bottom bar: the current notice, else the shortcuts.
pub(crate) fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let bar = match app.notice() {
        Some(notice) => Paragraph::new(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        None => Paragraph::new(labels::bottom_bar(app.is_streaming())).alignment(Alignment::Right),
    };
    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_password_is_masked() {
        let shown = masked_input("/admin hunter2");
        assert_eq!(shown, "/admin •••••••");
        assert!(!shown.contains("hunter2"));
        assert_eq!(shown.chars().count(), "/admin hunter2".chars().count());
    }

    #[test]
    fn other_input_is_shown() {
        assert_eq!(masked_input("/administer"), "/administer");
        assert_eq!(masked_input("2x = 4"), "2x = 4");
        assert_eq!(masked_input("/admin"), "/admin");
    }
}
