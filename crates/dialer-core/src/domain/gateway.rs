//! Outbound gateway configuration.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::FlexValue;
use crate::utils::timestamp::serde_datetime;
use crate::validation::{FieldError, ValidationErrors};

pub const DEFAULT_GATEWAY_CODECS: &str = "PCMA,PCMU";
pub const DEFAULT_GATEWAY_TIMEOUTS: &str = "60";
pub const DEFAULT_GATEWAY_RETRIES: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum GatewayStatus {
    Inactive = 0,
    #[default]
    Active = 1,
}

impl TryFrom<u8> for GatewayStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            other => Err(format!("unknown gateway status {other}")),
        }
    }
}

impl From<GatewayStatus> for u8 {
    fn from(status: GatewayStatus) -> Self {
        status as Self
    }
}

/// A call-routing endpoint.
///
/// `gateways`, `gateway_codecs`, `gateway_timeouts` and `gateway_retries`
/// are comma separated lists, one entry per dial string, tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub gateways: String,
    pub gateway_codecs: String,
    pub gateway_timeouts: String,
    pub gateway_retries: String,
    pub maximum_call: Option<u32>,
    pub status: GatewayStatus,
    #[serde(with = "serde_datetime")]
    pub created_date: NaiveDateTime,
    #[serde(with = "serde_datetime")]
    pub updated_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGateway {
    pub name: String,
    pub description: String,
    pub gateways: String,
    pub gateway_codecs: String,
    pub gateway_timeouts: String,
    pub gateway_retries: String,
    pub maximum_call: Option<u32>,
    pub status: GatewayStatus,
}

impl NewGateway {
    /// A gateway with default codec, timeout and retry settings.
    pub fn new(name: impl Into<String>, gateways: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            gateways: gateways.into(),
            gateway_codecs: DEFAULT_GATEWAY_CODECS.to_string(),
            gateway_timeouts: DEFAULT_GATEWAY_TIMEOUTS.to_string(),
            gateway_retries: DEFAULT_GATEWAY_RETRIES.to_string(),
            maximum_call: None,
            status: GatewayStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub gateways: Option<String>,
    pub gateway_codecs: Option<String>,
    pub gateway_timeouts: Option<String>,
    pub gateway_retries: Option<String>,
    pub maximum_call: Option<FlexValue>,
    pub status: Option<FlexValue>,
}

struct ParsedGateway {
    maximum_call: Option<u32>,
    status: Option<GatewayStatus>,
}

impl GatewayInput {
    fn parse(&self, errors: &mut ValidationErrors) -> ParsedGateway {
        let maximum_call = self.maximum_call.as_ref().and_then(|raw| {
            let value = raw.as_u32();
            if value.is_none() {
                errors.add(
                    "maximum_call",
                    FieldError::invalid(format!("'{raw}' is not a non-negative integer.")),
                );
            }
            value
        });
        let status = self.status.as_ref().and_then(|raw| {
            let value = raw
                .as_i64()
                .and_then(|v| u8::try_from(v).ok())
                .and_then(|v| GatewayStatus::try_from(v).ok());
            if value.is_none() {
                errors.add(
                    "status",
                    FieldError::invalid(format!("'{raw}' is not a valid status (0 or 1).")),
                );
            }
            value
        });
        ParsedGateway {
            maximum_call,
            status,
        }
    }

    pub fn normalize_new(&self) -> Result<NewGateway, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let parsed = self.parse(&mut errors);
        let name = required(self.name.as_deref(), "name", &mut errors);
        let gateways = required(self.gateways.as_deref(), "gateways", &mut errors);
        errors.into_result()?;

        let mut gateway = NewGateway::new(name, gateways);
        if let Some(description) = &self.description {
            gateway.description.clone_from(description);
        }
        if let Some(codecs) = &self.gateway_codecs {
            gateway.gateway_codecs.clone_from(codecs);
        }
        if let Some(timeouts) = &self.gateway_timeouts {
            gateway.gateway_timeouts.clone_from(timeouts);
        }
        if let Some(retries) = &self.gateway_retries {
            gateway.gateway_retries.clone_from(retries);
        }
        gateway.maximum_call = parsed.maximum_call;
        gateway.status = parsed.status.unwrap_or_default();
        Ok(gateway)
    }

    pub fn apply_to(
        &self,
        existing: &Gateway,
        now: NaiveDateTime,
    ) -> Result<Gateway, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let parsed = self.parse(&mut errors);
        for (key, value) in [("name", &self.name), ("gateways", &self.gateways)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                errors.add(key, FieldError::invalid("This field may not be blank."));
            }
        }
        errors.into_result()?;

        let mut updated = existing.clone();
        let text_fields = [
            (&self.name, &mut updated.name),
            (&self.description, &mut updated.description),
            (&self.gateways, &mut updated.gateways),
            (&self.gateway_codecs, &mut updated.gateway_codecs),
            (&self.gateway_timeouts, &mut updated.gateway_timeouts),
            (&self.gateway_retries, &mut updated.gateway_retries),
        ];
        for (source, target) in text_fields {
            if let Some(value) = source {
                target.clone_from(value);
            }
        }
        if parsed.maximum_call.is_some() {
            updated.maximum_call = parsed.maximum_call;
        }
        if let Some(status) = parsed.status {
            updated.status = status;
        }
        updated.updated_date = now;
        Ok(updated)
    }
}

/// Trimmed non-empty value of a required text field, recording an error otherwise.
pub(crate) fn required(value: Option<&str>, key: &str, errors: &mut ValidationErrors) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => {
            errors.add(key, FieldError::missing());
            String::new()
        }
    }
}
