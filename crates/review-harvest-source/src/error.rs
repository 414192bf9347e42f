use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Timeout or connection failure talking to the review endpoint.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Non-JSON body, or JSON missing the `reviews` key. Never retried.
    #[error("malformed response from review endpoint: {0}")]
    MalformedResponse(String),
}

impl SourceError {
    /// Whether a retry with backoff is worth attempting.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Transport(_) => true,
            SourceError::Status { status, .. } => status.is_server_error(),
            SourceError::MalformedResponse(_) => false,
        }
    }
}
