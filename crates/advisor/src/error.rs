use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("network error: {0}")]
    Transport(reqwest::Error),
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("model returned no text")]
    EmptyReply,
    #[error("cannot build prompt: {0}")]
    Prompt(serde_json::Error),
    #[error("assistant is not configured")]
    NotConfigured,
}

impl From<reqwest::Error> for AdvisorError {
    /// Drops the request URL so nothing sent in it ends up in logs.
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}
