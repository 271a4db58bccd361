//! Internal error types for call placement.
//!
//! These errors are internal to `dialer-telephony` and are mapped to core
//! port errors at the boundary.

use thiserror::Error;

pub type CallResult<T> = Result<T, CallError>;

#[derive(Debug, Error)]
pub enum CallError {
    /// The service answered with a non-success HTTP status.
    #[error("Call API request failed with status {status}: {body}")]
    ApiRequestFailed { status: u16, body: String },

    /// The service answered 2xx with nothing in the body.
    #[error("Call API returned an empty body")]
    EmptyBody,

    /// The body parsed but did not carry a `RequestUUID`.
    #[error("Call API response has no RequestUUID: {body}")]
    MissingRequestId { body: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
