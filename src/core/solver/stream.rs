//! Streaming reply chunks: content deltas, in-stream errors, size limit, token usage.

use serde_json::Value;

/// Max reply size (2MB) to prevent unbounded memory growth from malformed streams.
pub(super) const MAX_CONTENT_BYTES: usize = 2 * 1024 * 1024;

/// Token usage reported by the API in the final streaming chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Parse token usage from a streaming chunk's `usage` field (present in the final chunk).
pub(crate) fn parse_usage(chunk: &Value) -> Option<TokenUsage> {
    let usage = chunk.get("usage").filter(|u| u.is_object())?;
    Some(TokenUsage {
        prompt_tokens: usage.get("prompt_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
        completion_tokens: usage.get("completion_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
        total_tokens: usage.get("total_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
    })
}

/// Error message carried inside a chunk (`{"error": {"message": ...}}`).
pub(crate) fn chunk_error(chunk: &Value) -> Option<String> {
    let err = chunk.get("error")?;
    Some(
        err.get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error")
            .to_string(),
    )
}

/// Text content delta of the first choice, if non-empty.
pub(crate) fn content_delta(chunk: &Value) -> Option<&str> {
    chunk
        .get("choices")?
        .as_array()?
        .first()?
        .get("delta")?
        .get("content")?
        .as_str()
        .filter(|s| !s.is_empty())
}
