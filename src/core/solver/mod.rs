//! Upstream solver: one streamed chat completion per question, text or image.

mod error;
mod prompt;
mod stream;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use futures::StreamExt;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::image::ImagePayload;
use crate::core::normalize::normalize_prompt;
use crate::core::session::Question;

pub use error::{SolveError, map_api_error};
pub use stream::TokenUsage;

use stream::{MAX_CONTENT_BYTES, chunk_error, content_delta, parse_usage};

/// Warning glyph prefixed to failure replies.
pub const WARNING: &str = "⚠️";

/// What the user asked: typed text or a photographed equation.
#[derive(Debug, Clone, Copy)]
pub enum SolveRequest<'a> {
    Text(&'a str),
    Image(&'a ImagePayload),
}

impl SolveRequest<'_> {
    /// Label used in failure replies ("OpenAI error: ..." / "Vision error: ...").
    pub fn mode_label(&self) -> &'static str {
        match self {
            SolveRequest::Text(_) => "OpenAI",
            SolveRequest::Image(_) => "Vision",
        }
    }

    /// Request body for this question. Text questions are normalized first.
    pub fn body(&self, model: &str) -> Value {
        match self {
            SolveRequest::Text(question) => prompt::text_request(model, &normalize_prompt(question)),
            SolveRequest::Image(image) => prompt::image_request(model, image),
        }
    }
}

impl<'a> From<&'a Question> for SolveRequest<'a> {
    fn from(question: &'a Question) -> Self {
        match question {
            Question::Text(text) => SolveRequest::Text(text),
            Question::Image(image) => SolveRequest::Image(image),
        }
    }
}

/// Callback for each streamed content chunk.
pub type OnContentChunk = Box<dyn Fn(&str) + Send>;

/// Streaming and cancellation hooks for a solver call.
#[derive(Default)]
pub struct SolveOptions {
    pub on_content_chunk: Option<OnContentChunk>,
    pub cancel_token: Option<CancellationToken>,
}

/// A completed solver reply.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Reply text, whitespace trimmed.
    pub reply: String,
    pub usage: TokenUsage,
}

/// A reply ready for display: the solution text or a warning describing the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub failed: bool,
    pub usage: Option<TokenUsage>,
}

/// Turn a solver result into displayable reply text.
/// Failures become a plain-text warning that is segmented like any other reply.
pub fn reply_text(result: Result<Solution, SolveError>, mode_label: &str) -> Reply {
    match result {
        Ok(solution) => Reply {
            text: solution.reply,
            failed: false,
            usage: Some(solution.usage),
        },
        Err(SolveError::Cancelled) => Reply {
            text: format!("{} {}", WARNING, SolveError::Cancelled),
            failed: true,
            usage: None,
        },
        Err(e) => {
            log::warn!("{} call failed: {}", mode_label, e);
            Reply {
                text: format!("{} {} error: {}", WARNING, mode_label, e),
                failed: true,
                usage: None,
            }
        }
    }
}

/// Client for the upstream model.
pub struct Solver {
    client: Client<OpenAIConfig>,
    model: String,
}

impl Solver {
    pub fn new(config: &Config, model: &str) -> Self {
        Self {
            client: Client::with_config(config.openai_config.clone()),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one question and collect the streamed reply. One shot: no retries.
    pub async fn solve(
        &self,
        request: SolveRequest<'_>,
        options: SolveOptions,
    ) -> Result<Solution, SolveError> {
        let cancel_token = options.cancel_token.as_ref();
        if cancel_token.is_some_and(|t| t.is_cancelled()) {
            return Err(SolveError::Cancelled);
        }
        log::info!(
            "Calling {} solver (model {})",
            request.mode_label(),
            self.model
        );

        let chat_api = self.client.chat();
        let stream_future = chat_api.create_stream_byot::<_, Value>(request.body(&self.model));
        let stream_result = if let Some(token) = cancel_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return Err(SolveError::Cancelled);
                }
                result = stream_future => result,
            }
        } else {
            stream_future.await
        };
        let mut stream = stream_result.map_err(map_api_error)?;

        let mut full_content = String::new();
        let mut usage = TokenUsage::default();

        loop {
            let chunk_opt = if let Some(token) = cancel_token {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        return Err(SolveError::Cancelled);
                    }
                    chunk = stream.next() => chunk,
                }
            } else {
                stream.next().await
            };

            let Some(chunk_result) = chunk_opt else { break };
            let chunk = chunk_result.map_err(map_api_error)?;

            if let Some(msg) = chunk_error(&chunk) {
                return Err(SolveError::ApiMessage(msg));
            }
            if let Some(u) = parse_usage(&chunk) {
                usage = u;
            }
            if let Some(content) = content_delta(&chunk) {
                if full_content.len() + content.len() > MAX_CONTENT_BYTES {
                    log::warn!("Reply exceeded {} bytes, truncating", MAX_CONTENT_BYTES);
                    break;
                }
                full_content.push_str(content);
                if let Some(ref cb) = options.on_content_chunk {
                    cb(content);
                }
            }
        }

        log::debug!(
            "Reply complete: {} bytes, {} tokens",
            full_content.len(),
            usage.total_tokens
        );
        Ok(Solution {
            reply: full_content.trim().to_string(),
            usage,
        })
    }
}
