use std::sync::Arc;

/// Failures in the completion lifecycle.
///
/// Everything below the editor command layer returns these; the command layer
/// converts them into "no visible effect plus a logged diagnostic". Nothing
/// here is allowed to surface as a host-level crash.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    #[error("http error: {0}")]
    Http(Arc<reqwest::Error>),
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("request timed out")]
    Timeout,
    #[error("request cancelled")]
    Cancelled,
    #[error("model returned no completion")]
    EmptyResponse,
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("preview anchor is stale: the document changed since the preview was shown")]
    StaleAnchor,
    #[error("edit error: {0}")]
    Edit(#[from] scribe_core::EditError),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        // Keep `?` conversions timeout-aware so reqwest timeouts are not
        // misclassified as generic transport failures.
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(Arc::new(err))
        }
    }
}
