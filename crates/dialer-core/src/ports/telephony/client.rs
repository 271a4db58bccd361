//! Telephony port trait.

use async_trait::async_trait;

use super::error::TelephonyResult;
use super::types::{CallRequest, CallResponse};

/// Places outbound calls through an external telephony service.
///
/// Implementations perform a single attempt per call: no retry and no
/// backoff. A response that does not identify the placed call is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelephonyPort: Send + Sync {
    async fn place_call(&self, request: &CallRequest) -> TelephonyResult<CallResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn _assert_object_safe(_: Arc<dyn TelephonyPort>) {}
}
