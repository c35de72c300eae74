//! TUI (Text User Interface) to ask the solver questions in chat mode.

mod app;
mod chat_result;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod text;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::core::config::Config;

use app::App;
use draw::draw;
use handlers::{HandleResult, PendingSolve};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Drain the channels of an in-flight call into the app. Returns true once the call has finished.
fn poll_pending(app: &mut App, pending: &PendingSolve) -> bool {
    while let Ok(chunk) = pending.stream_rx.try_recv() {
        app.append_reply_chunk(&chunk);
    }
    match pending.result_rx.try_recv() {
        Ok(reply) => {
            chat_result::handle_solve_result(app, reply);
            true
        }
        Err(std::sync::mpsc::TryRecvError::Empty) => false,
        Err(std::sync::mpsc::TryRecvError::Disconnected) => {
            log::warn!("Solver thread ended without a reply");
            app.streaming_reply = None;
            true
        }
    }
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for solver calls.
pub fn run(config: Arc<Config>) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    let mut app = App::new(config.model_id.clone(), config.show_timestamps);
    let mut pending_solve: Option<PendingSolve> = None;

    // Mouse events for wheel scrolling
    execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;

    loop {
        if let Some(ref pending) = pending_solve
            && poll_pending(&mut app, pending)
        {
            pending_solve = None;
        }

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Mouse(mouse) => {
                    let _ = handlers::handle_mouse(mouse, &mut app);
                }
                Event::Key(key) => {
                    let result = handlers::handle_key(
                        key,
                        handlers::HandleKeyContext {
                            app: &mut app,
                            config: &config,
                            pending_solve: &mut pending_solve,
                            rt: &rt,
                        },
                    );
                    if result == HandleResult::Break {
                        if let Some(pending) = pending_solve.take() {
                            pending.cancel_token.cancel();
                        }
                        app.end_session();
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
