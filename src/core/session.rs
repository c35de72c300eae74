//! Conversation history for one interactive session.
//!
//! Turns are only ever appended. The history lives as long as the session and is
//! dropped when it ends; nothing is written to disk.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::image::ImagePayload;

/// What a user turn carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    Text(String),
    Image(ImagePayload),
}

/// One entry in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    User(Question),
    Assistant {
        reply: String,
        /// The reply is a warning produced from a failed solver call.
        failed: bool,
    },
}

/// Append-only conversation history with per-turn timestamps.
#[derive(Debug, Default)]
pub struct Session {
    turns: Vec<Turn>,
    /// Unix timestamps (seconds), parallel to `turns`.
    timestamps: Vec<u64>,
}

fn unix_timestamp_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.timestamps.push(unix_timestamp_secs());
    }

    pub fn push_question(&mut self, text: &str) {
        self.push(Turn::User(Question::Text(text.to_string())));
    }

    pub fn push_image(&mut self, image: ImagePayload) {
        self.push(Turn::User(Question::Image(image)));
    }

    pub fn push_reply(&mut self, reply: String, failed: bool) {
        self.push(Turn::Assistant { reply, failed });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn timestamp(&self, index: usize) -> Option<u64> {
        self.timestamps.get(index).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of questions asked so far (text or image).
    pub fn question_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| matches!(t, Turn::User(_)))
            .count()
    }
}
