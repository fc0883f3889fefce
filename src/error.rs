//! Error type shared by the translation provider and the completion client.

use thiserror::Error;

/// Result alias for provider and client operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Errors surfaced by [`crate::translation::ChatGptProvider`].
///
/// Client failures are never retried; any one of them aborts the whole
/// batch it belongs to.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// A required request field or provider setting is missing.
    #[error("{0}")]
    Validation(String),

    /// The upstream API answered with HTTP 429.
    #[error("{0}")]
    RateLimited(String),

    /// The upstream API answered with HTTP 400.
    #[error("{0}")]
    BadRequest(String),

    /// The upstream API answered without any usable choice.
    #[error("{0}")]
    NoResult(String),

    /// Any other transport or API failure, carrying its serialized detail.
    #[error("translate(): {0}")]
    Unknown(String),

    /// The model reply was not valid JSON.
    #[error("model reply is not valid JSON: {0}")]
    InvalidReply(#[from] serde_json::Error),
}

impl TranslateError {
    pub fn rate_limited() -> Self {
        Self::RateLimited("Too many requests".to_string())
    }

    pub fn bad_request() -> Self {
        Self::BadRequest("Bad request".to_string())
    }

    pub fn no_result() -> Self {
        Self::NoResult("No result received".to_string())
    }
}
