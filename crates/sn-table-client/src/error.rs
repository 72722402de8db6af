//! Record fetcher error types.

use thiserror::Error;

/// Errors that can occur while reading from the ServiceNow instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("{0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid upstream response: {0}")]
    Decode(String),
}

/// Convenience alias for fetcher results.
pub type FetchResult<T> = Result<T, FetchError>;
