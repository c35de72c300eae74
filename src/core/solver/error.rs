//! Solver call errors.

/// Errors from a solver call. Rendered to the user as a warning reply, never retried.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("{0}")]
    ApiAuth(String),
    #[error("API error: {0}")]
    ApiMessage(String),
    /// The request was cancelled by the user.
    #[error("Request cancelled")]
    Cancelled,
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Map async-openai or API errors into SolveError.
pub fn map_api_error<E>(e: E) -> SolveError
where
    E: std::fmt::Display + Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    let s = e.to_string();
    if s.contains("401") || s.contains("invalid_api_key") || s.contains("Incorrect API key") {
        return SolveError::ApiAuth(
            "API error (401): invalid credentials. Check OPENAI_API_KEY in .env.".to_string(),
        );
    }
    if s.contains("\"error\"")
        && let Some((_, rest)) = s.split_once("\"message\":\"")
        && let Some((msg, _)) = rest.split_once('"')
    {
        return SolveError::ApiMessage(msg.to_string());
    }
    SolveError::Other(e.into())
}
