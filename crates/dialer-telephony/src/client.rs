//! Call-placement client.

use dialer_core::ports::telephony::EXTRA_DIAL_STRING;
use dialer_core::{CallRequest, CallResponse};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::TelephonyConfig;
use crate::error::{CallError, CallResult};
use crate::http::{CallBackend, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Telephony client using the reqwest HTTP backend.
pub type DefaultTelephonyClient = RestCallClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the telephony REST service's `Call` endpoint.
///
/// Generic over the HTTP backend so tests can inject a fake. External code
/// uses [`DefaultTelephonyClient`] through the `TelephonyPort` trait.
pub struct RestCallClient<B: CallBackend> {
    pub(crate) backend: B,
    endpoint: Url,
    answer_url: Option<String>,
    hangup_url: Option<String>,
}

impl DefaultTelephonyClient {
    /// Create a client from configuration.
    ///
    /// Fails when the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn with_config(config: TelephonyConfig) -> CallResult<Self> {
        let backend = ReqwestBackend::new(&config)?;
        Self::with_backend(&config, backend)
    }
}

impl<B: CallBackend> RestCallClient<B> {
    pub(crate) fn with_backend(config: &TelephonyConfig, backend: B) -> CallResult<Self> {
        Ok(Self {
            backend,
            endpoint: Url::parse(&config.call_endpoint())?,
            answer_url: config.answer_url.clone(),
            hangup_url: config.hangup_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Form parameters for one call.
    ///
    /// Answer and hangup URLs fall back to the configured ones and are left
    /// out entirely when neither is set.
    pub(crate) fn call_params(&self, request: &CallRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("From", request.caller_id.clone()),
            ("To", request.destination.clone()),
            ("Gateways", request.gateway_string()),
            ("GatewayCodecs", request.gateway_codecs.clone()),
            ("GatewayTimeouts", request.gateway_timeouts.clone()),
            ("GatewayRetries", request.gateway_retries.clone()),
            ("ExtraDialString", EXTRA_DIAL_STRING.to_string()),
        ];
        if let Some(url) = request.answer_url.as_ref().or(self.answer_url.as_ref()) {
            params.push(("AnswerUrl", url.clone()));
        }
        if let Some(url) = request.hangup_url.as_ref().or(self.hangup_url.as_ref()) {
            params.push(("HangupUrl", url.clone()));
        }
        params.push(("TimeLimit", request.time_limit_secs.to_string()));
        params
    }

    /// POST the call once and decode the service's answer.
    pub(crate) async fn place(&self, request: &CallRequest) -> CallResult<CallResponse> {
        let params = self.call_params(request);
        debug!(to = %request.destination, gateways = %request.gateway_string(), "Placing call");
        let body = self.backend.post_form(&self.endpoint, &params).await?;
        parse_call_response(&body)
    }
}

/// Decode `{"RequestUUID": "...", "Message": "..."}`.
fn parse_call_response(body: &str) -> CallResult<CallResponse> {
    if body.trim().is_empty() {
        return Err(CallError::EmptyBody);
    }
    let value: Value = serde_json::from_str(body)?;
    let request_uuid = value
        .get("RequestUUID")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CallError::MissingRequestId {
            body: body.to_string(),
        })?;

    Ok(CallResponse {
        request_uuid: request_uuid.to_string(),
        message: value
            .get("Message")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
