//! Error types for telephony port operations.

use thiserror::Error;

/// Errors from placing a call.
///
/// Transport and decoding details are mapped to these by the adapter.
#[derive(Debug, Error)]
pub enum TelephonyError {
    /// The service could not be reached.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The service answered with a non-success status.
    #[error("Telephony service rejected the call (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    /// The service answered with an empty body.
    #[error("Telephony service returned an empty response")]
    EmptyResponse,

    /// The body could not be decoded or carried no request id.
    #[error("Invalid telephony response: {message}")]
    MalformedResponse { message: String },

    /// The call request itself is unusable (no destination, no gateway).
    #[error("Invalid call request: {message}")]
    InvalidRequest { message: String },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type TelephonyResult<T> = Result<T, TelephonyError>;
