//! TUI rendering: layout and widgets for the chat interface.

mod header;
mod history;
mod input;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::app::App;
use super::constants::INPUT_HEIGHT;

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);
    header::draw_header(f, app, chunks[0]);
    history::draw_history(f, app, chunks[1]);
    input::draw_input_block(f, app, chunks[2]);
    input::draw_bottom_bar(f, app, chunks[3]);
}
