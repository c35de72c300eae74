//! Event handlers for the TUI: keyboard and mouse.

mod commands;
mod input;
mod solve_spawn;

use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::sync::mpsc;
use tokio_util::sync::CancellationToken;

use tokio::runtime::Runtime;

use crate::core::config::Config;
use crate::core::solver::Reply;

use super::app::App;
use super::constants;
use super::shortcuts::Shortcut;

/// Holds receivers for a solver call in progress (streamed content, final reply).
pub struct PendingSolve {
    pub stream_rx: mpsc::Receiver<String>,
    pub result_rx: mpsc::Receiver<Reply>,
    /// Token to cancel the in-flight request.
    pub cancel_token: CancellationToken,
}

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Handle a mouse event (wheel scrolls the history).
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) -> HandleResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(constants::SCROLL_LINES_SMALL),
        MouseEventKind::ScrollDown => app.scroll_down(constants::SCROLL_LINES_SMALL),
        _ => {}
    }
    HandleResult::Continue
}

/// Context for key event handling. Bundles mutable state to reduce parameter count.
pub struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub config: &'a Arc<Config>,
    pub pending_solve: &'a mut Option<PendingSolve>,
    pub rt: &'a Arc<Runtime>,
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: KeyEvent, ctx: HandleKeyContext<'_>) -> HandleResult {
    let HandleKeyContext {
        app,
        config,
        pending_solve,
        rt,
    } = ctx;

    match Shortcut::match_key(&key) {
        Some(Shortcut::Quit) => return HandleResult::Break,
        Some(Shortcut::Cancel) => {
            if let Some(pending) = pending_solve.as_ref() {
                log::info!("Cancelling in-flight request");
                pending.cancel_token.cancel();
            }
            return HandleResult::Continue;
        }
        Some(Shortcut::NewSession) => {
            if let Some(pending) = pending_solve.take() {
                pending.cancel_token.cancel();
            }
            app.end_session();
            app.set_notice("Started a new session");
            return HandleResult::Continue;
        }
        Some(Shortcut::ClearInput) => {
            app.input.clear();
            return HandleResult::Continue;
        }
        None => {}
    }

    if key.kind != crossterm::event::KeyEventKind::Press {
        return HandleResult::Continue;
    }

    input::handle_main_input(key.code, key.modifiers, app, config, pending_solve, rt)
}
