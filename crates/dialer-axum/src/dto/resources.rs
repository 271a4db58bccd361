//! User, gateway and VoIP application DTOs plus the dial request.

use chrono::NaiveDateTime;
use dialer_core::utils::timestamp::serde_datetime_opt;
use dialer_core::{CallResponse, Gateway, ResourceKind, User, VoipApp};
use serde::{Deserialize, Serialize};

/// Public view of an account. Never carries credentials or privileges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "serde_datetime_opt")]
    pub last_login: Option<NaiveDateTime>,
    pub resource_uri: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            resource_uri: ResourceKind::User.uri(user.id),
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayDto {
    #[serde(flatten)]
    pub gateway: Gateway,
    pub resource_uri: String,
}

impl From<Gateway> for GatewayDto {
    fn from(gateway: Gateway) -> Self {
        Self {
            resource_uri: ResourceKind::Gateway.uri(gateway.id),
            gateway,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoipAppDto {
    #[serde(flatten)]
    pub app: VoipApp,
    pub resource_uri: String,
}

impl From<VoipApp> for VoipAppDto {
    fn from(app: VoipApp) -> Self {
        Self {
            resource_uri: ResourceKind::VoipApp.uri(app.id),
            app,
        }
    }
}

/// Body of `POST /api/v1/campaign/{id}/dial/`.
#[derive(Debug, Clone, Deserialize)]
pub struct DialRequest {
    pub phone_number: String,
}

/// The telephony service's acknowledgement, in its own field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallResponseDto {
    #[serde(rename = "RequestUUID")]
    pub request_uuid: String,
    #[serde(rename = "Message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<CallResponse> for CallResponseDto {
    fn from(response: CallResponse) -> Self {
        Self {
            request_uuid: response.request_uuid,
            message: response.message,
        }
    }
}
