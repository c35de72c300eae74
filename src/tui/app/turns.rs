//! Question and reply handling for the chat history.

use crate::core::image::ImagePayload;
use crate::core::solver::Reply;

use super::{App, ScrollPosition};

impl App {
    /// Record a typed question and start waiting for its reply.
    pub(crate) fn ask(&mut self, question: &str) {
        self.session.push_question(question);
        self.begin_reply();
    }

    /// Record an uploaded image and start waiting for its reply.
    pub(crate) fn attach(&mut self, image: ImagePayload) {
        self.session.push_image(image);
        self.begin_reply();
    }

    fn begin_reply(&mut self) {
        self.streaming_reply = Some(String::new());
        self.scroll = ScrollPosition::Bottom;
    }

    /// Append a streamed content chunk to the reply in progress.
    pub(crate) fn append_reply_chunk(&mut self, chunk: &str) {
        if let Some(partial) = self.streaming_reply.as_mut() {
            partial.push_str(chunk);
        }
    }

    /// Replace the partial reply with the final one and append it to the session.
    pub(crate) fn finish_reply(&mut self, reply: Reply) {
        self.streaming_reply = None;
        if let Some(usage) = reply.usage {
            self.token_usage = Some(usage);
        }
        self.session.push_reply(reply.text, reply.failed);
        self.scroll = ScrollPosition::Bottom;
    }
}
