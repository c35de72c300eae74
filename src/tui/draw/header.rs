//! Header: logo, title, subtitle, and (admin mode) model and token usage.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::sync::OnceLock;
use std::time::Instant;

use crate::core::app::TITLE;
use crate::core::solver::TokenUsage;

use super::super::app::App;
use super::super::constants::{ACCENT, LOGO_IDLE, LOGO_THINKING, SUBTITLE};

/// Start time for header animation phase (thinking spinner).
static HEADER_START: OnceLock<Instant> = OnceLock::new();

/// Width for the admin details (model id and token usage).
const ADMIN_HEADER_WIDTH: u16 = 40;

/// Format a token count in compact form: 1234 -> "1.2k", 128000 -> "128k", 1500000 -> "1.5M".
fn format_tokens_compact(tokens: u64) -> String {
    let (value, unit) = if tokens >= 1_000_000 {
        (tokens as f64 / 1_000_000.0, "M")
    } else if tokens >= 1_000 {
        (tokens as f64 / 1_000.0, "k")
    } else {
        return tokens.to_string();
    };
    if value == value.floor() {
        format!("{}{}", value as u64, unit)
    } else {
        format!("{:.1}{}", value, unit)
    }
}

/// "gpt-4o · 1.2k tok (800 in / 400 out)", or "gpt-4o · — tok" before the first reply.
fn admin_details(model_id: &str, usage: Option<TokenUsage>) -> String {
    match usage {
        Some(u) => format!(
            "{} · {} tok ({} in / {} out)",
            model_id,
            format_tokens_compact(u.total_tokens),
            format_tokens_compact(u.prompt_tokens),
            format_tokens_compact(u.completion_tokens)
        ),
        None => format!("{} · — tok", model_id),
    }
}

pub(crate) fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(ADMIN_HEADER_WIDTH),
        ])
        .split(rows[0]);

    let logo_symbol = if app.is_streaming() {
        let start = HEADER_START.get_or_init(Instant::now);
        let frame = (start.elapsed().as_millis() as usize / 80) % LOGO_THINKING.len();
        LOGO_THINKING[frame]
    } else {
        LOGO_IDLE
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {} ", logo_symbol),
            Style::default().fg(ACCENT),
        )),
        top[0],
    );

    let title = Line::from(Span::styled(
        TITLE,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), rows[0]);

    if app.admin {
        let details = Line::from(Span::styled(
            admin_details(&app.model_id, app.token_usage),
            Style::default().fg(Color::DarkGray),
        ));
        f.render_widget(Paragraph::new(details).alignment(Alignment::Right), top[2]);
    }

    if app.session.is_empty() && !app.is_streaming() {
        let subtitle = Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray)));
        f.render_widget(Paragraph::new(subtitle).alignment(Alignment::Center), rows[1]);
    }
}
