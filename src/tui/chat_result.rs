//! Handling of finished solver calls.

use crate::core::solver::Reply;

use super::app::App;

/// Process a finished call: the reply (or its warning) replaces the streamed text.
pub(super) fn handle_solve_result(app: &mut App, reply: Reply) {
    if reply.failed {
        log::debug!("Showing failure reply: {}", reply.text);
    } else {
        log::debug!("Reply received: {} bytes", reply.text.len());
    }
    app.finish_reply(reply);
}
