//! Spawns solver calls in a background thread with stream/result channels.

use std::sync::Arc;
use std::sync::mpsc;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::session::Question;
use crate::core::solver::{self, OnContentChunk, SolveOptions, SolveRequest, Solver};

use super::PendingSolve;

/// Spawn a solver call for one question. Returns PendingSolve with channels for stream and result.
pub fn spawn_solve(
    rt: &Arc<Runtime>,
    config: Arc<Config>,
    model_id: String,
    question: Question,
) -> PendingSolve {
    let (stream_tx, stream_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();
    let cancel_token = CancellationToken::new();
    let cancel_token_clone = cancel_token.clone();
    let rt_clone = Arc::clone(rt);

    std::thread::spawn(move || {
        let solver = Solver::new(config.as_ref(), &model_id);
        let request = SolveRequest::from(&question);
        log::debug!(
            "Spawned {} request on {}",
            request.mode_label(),
            solver.model()
        );
        let on_content_chunk: OnContentChunk = Box::new(move |s| {
            let _ = stream_tx.send(s.to_string());
        });
        let result = rt_clone.block_on(solver.solve(
            request,
            SolveOptions {
                on_content_chunk: Some(on_content_chunk),
                cancel_token: Some(cancel_token_clone),
            },
        ));
        let _ = result_tx.send(solver::reply_text(result, request.mode_label()));
    });

    PendingSolve {
        stream_rx,
        result_rx,
        cancel_token,
    }
}
