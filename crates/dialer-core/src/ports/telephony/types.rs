//! Core-owned call request and response types.

use serde::{Deserialize, Serialize};

use super::error::TelephonyError;

/// Codec list sent when the caller does not override it.
///
/// The surrounding single quotes are part of the value the media server
/// expects for a multi-codec list.
pub const DEFAULT_GATEWAY_CODECS: &str = "'PCMA,PCMU'";
pub const DEFAULT_GATEWAY_TIMEOUTS: &str = "60";
pub const DEFAULT_GATEWAY_RETRIES: &str = "1";
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 3600;

/// Channel variables attached to every call. Caller input never changes it.
pub const EXTRA_DIAL_STRING: &str = "bridge_early_media=true,hangup_after_bridge=true";

/// One outbound call to place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    pub caller_id: String,
    pub destination: String,
    /// Gateway dial strings, tried in order.
    pub gateways: Vec<String>,
    pub gateway_codecs: String,
    pub gateway_timeouts: String,
    pub gateway_retries: String,
    pub time_limit_secs: u32,
    /// Overrides the adapter's configured answer URL.
    pub answer_url: Option<String>,
    /// Overrides the adapter's configured hangup URL.
    pub hangup_url: Option<String>,
}

impl CallRequest {
    pub fn new(caller_id: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            caller_id: caller_id.into(),
            destination: destination.into(),
            gateways: Vec::new(),
            gateway_codecs: DEFAULT_GATEWAY_CODECS.to_string(),
            gateway_timeouts: DEFAULT_GATEWAY_TIMEOUTS.to_string(),
            gateway_retries: DEFAULT_GATEWAY_RETRIES.to_string(),
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            answer_url: None,
            hangup_url: None,
        }
    }

    #[must_use]
    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateways.push(gateway.into());
        self
    }

    /// Add every non-empty entry of a comma separated dial string list.
    #[must_use]
    pub fn with_gateway_list(mut self, list: &str) -> Self {
        self.gateways.extend(
            list.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string),
        );
        self
    }

    #[must_use]
    pub fn with_codecs(mut self, codecs: impl Into<String>) -> Self {
        self.gateway_codecs = codecs.into();
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: impl Into<String>) -> Self {
        self.gateway_timeouts = timeouts.into();
        self
    }

    #[must_use]
    pub fn with_retries(mut self, retries: impl Into<String>) -> Self {
        self.gateway_retries = retries.into();
        self
    }

    #[must_use]
    pub const fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    #[must_use]
    pub fn with_answer_url(mut self, url: impl Into<String>) -> Self {
        self.answer_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_hangup_url(mut self, url: impl Into<String>) -> Self {
        self.hangup_url = Some(url.into());
        self
    }

    /// Gateways joined the way the service expects them.
    pub fn gateway_string(&self) -> String {
        self.gateways.join(",")
    }

    /// Reject requests that cannot be dialed.
    pub fn validate(&self) -> Result<(), TelephonyError> {
        if self.destination.trim().is_empty() {
            return Err(TelephonyError::InvalidRequest {
                message: "destination number is empty".to_string(),
            });
        }
        if self.gateways.is_empty() {
            return Err(TelephonyError::InvalidRequest {
                message: "no gateway to dial through".to_string(),
            });
        }
        Ok(())
    }
}

/// Acknowledgement of a placed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResponse {
    /// Identifier the service assigned to the call.
    pub request_uuid: String,
    pub message: Option<String>,
}
