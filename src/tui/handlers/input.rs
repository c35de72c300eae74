//! Handler for main input (question line, commands, scroll).

use crossterm::event::{KeyCode, KeyModifiers};
use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::core::admin::{self, AdminCheck};
use crate::core::config::Config;
use crate::core::image;
use crate::core::session::Question;

use super::super::app::App;
use super::super::constants;
use super::commands::{InputCommand, parse_input};
use super::solve_spawn;
use super::{HandleResult, PendingSolve};

/// Handle main input keys.
pub(crate) fn handle_main_input(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    app: &mut App,
    config: &Arc<Config>,
    pending_solve: &mut Option<PendingSolve>,
    rt: &Arc<Runtime>,
) -> HandleResult {
    match (key_code, key_modifiers) {
        (KeyCode::Enter, _) => {
            if pending_solve.is_some() {
                app.set_notice("Waiting for the current reply (Esc to cancel)");
            } else {
                submit(app, config, pending_solve, rt);
            }
        }
        (KeyCode::Backspace, _) => {
            app.input.pop();
        }
        (KeyCode::Up, _) => app.scroll_up(constants::SCROLL_LINES_SMALL),
        (KeyCode::Down, _) => app.scroll_down(constants::SCROLL_LINES_SMALL),
        (KeyCode::PageUp, _) => app.scroll_up(constants::SCROLL_LINES_PAGE),
        (KeyCode::PageDown, _) => app.scroll_down(constants::SCROLL_LINES_PAGE),
        (KeyCode::Char(c), mods) => {
            if !mods.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
                app.input.push(c);
            }
        }
        _ => {}
    }
    HandleResult::Continue
}

/// Act on the submitted input line: ask, attach an image, or run a command.
fn submit(
    app: &mut App,
    config: &Arc<Config>,
    pending_solve: &mut Option<PendingSolve>,
    rt: &Arc<Runtime>,
) {
    let input = std::mem::take(&mut app.input);
    let question = match parse_input(&input) {
        InputCommand::Empty => {
            app.set_notice(constants::EMPTY_INPUT_NOTICE);
            return;
        }
        InputCommand::Ask(text) => {
            app.ask(text);
            Question::Text(text.to_string())
        }
        InputCommand::Image(path) => match image::load(Path::new(path)) {
            Ok(payload) => {
                log::info!("Attached image {}", payload.label());
                app.attach(payload.clone());
                Question::Image(payload)
            }
            Err(e) => {
                log::warn!("{}", e);
                app.set_notice(e.to_string());
                app.input = input;
                return;
            }
        },
        InputCommand::Admin(password) => {
            let check = admin::verify(config, password);
            match check {
                AdminCheck::Enabled => app.admin = true,
                AdminCheck::Rejected => app.admin = false,
                AdminCheck::Unavailable => {}
            }
            log::info!("Admin check: {:?}", check);
            app.set_notice(check.notice());
            return;
        }
        InputCommand::Clear => {
            app.end_session();
            app.set_notice("Started a new session");
            return;
        }
        InputCommand::Usage(usage) => {
            app.set_notice(usage);
            app.input = input;
            return;
        }
        InputCommand::Unknown(name) => {
            app.set_notice(format!("Unknown command: /{}", name));
            app.input = input;
            return;
        }
    };

    *pending_solve = Some(solve_spawn::spawn_solve(
        rt,
        Arc::clone(config),
        app.model_id.clone(),
        question,
    ));
}
