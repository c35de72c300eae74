//! TUI application state: session, input, scroll, notices.

mod turns;

use std::time::Instant;

use crate::core::session::Session;
use crate::core::solver::TokenUsage;

use super::constants::NOTICE_DURATION;

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPosition {
    Line(usize),
    Bottom,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::Line(0)
    }
}

pub struct App {
    /// Conversation history for the current session.
    pub(crate) session: Session,
    /// User input in the text field.
    pub(crate) input: String,
    pub(crate) scroll: ScrollPosition,
    pub(crate) last_max_scroll: usize,
    /// Reply text received so far while a call is in flight.
    pub(crate) streaming_reply: Option<String>,
    /// Model ID used for solver calls; shown in the header in admin mode.
    pub(crate) model_id: String,
    pub(crate) admin: bool,
    /// Whether to show HH:MM next to message labels (from SNAP2SOLVE_SHOW_TIMESTAMPS).
    pub(crate) show_timestamps: bool,
    /// Token usage of the last completed call.
    pub(crate) token_usage: Option<TokenUsage>,
    /// Bottom bar notice and when it was set.
    notice: Option<(String, Instant)>,
}

impl App {
    pub fn new(model_id: String, show_timestamps: bool) -> Self {
        Self {
            session: Session::new(),
            input: String::new(),
            scroll: ScrollPosition::default(),
            last_max_scroll: 0,
            streaming_reply: None,
            model_id,
            admin: false,
            show_timestamps,
            token_usage: None,
            notice: None,
        }
    }

    /// True while a solver call is in flight.
    pub(crate) fn is_streaming(&self) -> bool {
        self.streaming_reply.is_some()
    }

    /// Drop the current history and start a fresh session.
    pub(crate) fn end_session(&mut self) {
        log::info!(
            "Ending session after {} question(s)",
            self.session.question_count()
        );
        self.session = Session::new();
        self.streaming_reply = None;
        self.scroll = ScrollPosition::default();
        self.last_max_scroll = 0;
        self.token_usage = None;
    }

    pub(crate) fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some((text.into(), Instant::now()));
    }

    /// Current notice, if it has not expired.
    pub(crate) fn notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|(_, at)| at.elapsed() < NOTICE_DURATION)
            .map(|(text, _)| text.as_str())
    }

    /// Must be called before scroll_up/scroll_down when at bottom.
    pub(crate) fn materialize_scroll(&mut self) {
        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::Line(self.last_max_scroll);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line((pos + n).min(self.last_max_scroll));
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }
}
