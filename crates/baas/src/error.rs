use engine::EngineError;
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BaasError>;

#[derive(Debug, Error)]
pub enum BaasError {
    /// Bad credentials or an expired/unknown access token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("query failed ({status}, {code}): {message}")]
    Query {
        status: StatusCode,
        code: String,
        message: String,
    },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    /// A row decoded fine but violates a domain invariant.
    #[error(transparent)]
    Domain(#[from] EngineError),
    #[error("invalid configuration: {0}")]
    Config(String),
}
