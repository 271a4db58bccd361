//! Port trait implementation for `RestCallClient`.

use async_trait::async_trait;
use dialer_core::{CallRequest, CallResponse, TelephonyError, TelephonyPort, TelephonyResult};

use crate::client::RestCallClient;
use crate::error::CallError;
use crate::http::CallBackend;

// ============================================================================
// Error Mapping
// ============================================================================

fn map_error(err: CallError) -> TelephonyError {
    match err {
        CallError::ApiRequestFailed { status, body } => TelephonyError::Rejected { status, body },
        CallError::EmptyBody => TelephonyError::EmptyResponse,
        CallError::MissingRequestId { body } => TelephonyError::MalformedResponse {
            message: format!("no RequestUUID in {body}"),
        },
        CallError::Network(e) => TelephonyError::Network {
            message: e.to_string(),
        },
        CallError::InvalidUrl(e) => TelephonyError::Configuration {
            message: e.to_string(),
        },
        CallError::JsonParse(e) => TelephonyError::MalformedResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: CallBackend> TelephonyPort for RestCallClient<B> {
    async fn place_call(&self, request: &CallRequest) -> TelephonyResult<CallResponse> {
        request.validate()?;
        self.place(request).await.map_err(map_error)
    }
}
