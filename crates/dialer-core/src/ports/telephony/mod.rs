//! Telephony port definitions.
//!
//! The core asks the telephony service to place exactly one outbound call.
//! The REST implementation lives in `dialer-telephony`.

mod client;
mod error;
mod types;

pub use client::TelephonyPort;
#[cfg(test)]
pub use client::MockTelephonyPort;
pub use error::{TelephonyError, TelephonyResult};
pub use types::{
    CallRequest, CallResponse, DEFAULT_GATEWAY_CODECS, DEFAULT_GATEWAY_RETRIES,
    DEFAULT_GATEWAY_TIMEOUTS, DEFAULT_TIME_LIMIT_SECS, EXTRA_DIAL_STRING,
};
