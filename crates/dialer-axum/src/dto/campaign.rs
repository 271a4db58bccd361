//! Campaign DTOs.
//!
//! `campaign` nests the owner, gateway and application; `mycampaign`
//! links the owner by URI; `rating` carries no references. The latter two
//! add a fixed `rating` and the requesting peer address.

use chrono::{NaiveDateTime, NaiveTime};
use dialer_core::domain::{Pacing, WeeklySchedule};
use dialer_core::utils::timestamp::serde_datetime;
use dialer_core::{Campaign, CampaignDetail, CampaignStatus, ResourceKind};
use serde::Serialize;

use super::{GatewayDto, UserDto, VoipAppDto};

/// Score reported by the `mycampaign` and `rating` resources.
pub const CAMPAIGN_RATING: f64 = 5.0;

/// Scalar campaign fields shared by every campaign representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignFields {
    pub id: i64,
    pub campaign_code: String,
    pub name: String,
    pub description: String,
    pub callerid: String,
    pub status: CampaignStatus,
    #[serde(with = "serde_datetime")]
    pub startingdate: NaiveDateTime,
    #[serde(with = "serde_datetime")]
    pub expirationdate: NaiveDateTime,
    pub daily_start_time: NaiveTime,
    pub daily_stop_time: NaiveTime,
    #[serde(flatten)]
    pub schedule: WeeklySchedule,
    #[serde(flatten)]
    pub pacing: Pacing,
    pub extra_data: String,
    #[serde(with = "serde_datetime")]
    pub created_date: NaiveDateTime,
    #[serde(with = "serde_datetime")]
    pub updated_date: NaiveDateTime,
    pub resource_uri: String,
}

impl CampaignFields {
    pub fn new(campaign: Campaign, kind: ResourceKind) -> Self {
        Self {
            resource_uri: kind.uri(campaign.id),
            id: campaign.id,
            campaign_code: campaign.campaign_code,
            name: campaign.name,
            description: campaign.description,
            callerid: campaign.callerid,
            status: campaign.status,
            startingdate: campaign.startingdate,
            expirationdate: campaign.expirationdate,
            daily_start_time: campaign.daily_start_time,
            daily_stop_time: campaign.daily_stop_time,
            schedule: campaign.schedule,
            pacing: campaign.pacing,
            extra_data: campaign.extra_data,
            created_date: campaign.created_date,
            updated_date: campaign.updated_date,
        }
    }
}

/// `/api/v1/campaign/` representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignDto {
    #[serde(flatten)]
    pub fields: CampaignFields,
    pub aleg_gateway: Option<GatewayDto>,
    pub voipapp: Option<VoipAppDto>,
    pub user: Option<UserDto>,
}

impl From<CampaignDetail> for CampaignDto {
    fn from(detail: CampaignDetail) -> Self {
        Self {
            fields: CampaignFields::new(detail.campaign, ResourceKind::Campaign),
            aleg_gateway: detail.aleg_gateway.map(GatewayDto::from),
            voipapp: detail.voipapp.map(VoipAppDto::from),
            user: detail.owner.map(UserDto::from),
        }
    }
}

/// `/api/v1/mycampaign/` representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MyCampaignDto {
    #[serde(flatten)]
    pub fields: CampaignFields,
    /// Owner URI.
    pub user: String,
    pub rating: f64,
    pub request_ip: Option<String>,
}

impl MyCampaignDto {
    pub fn new(campaign: Campaign, request_ip: Option<String>) -> Self {
        let user = ResourceKind::User.uri(campaign.user_id);
        Self {
            fields: CampaignFields::new(campaign, ResourceKind::MyCampaign),
            user,
            rating: CAMPAIGN_RATING,
            request_ip,
        }
    }
}

/// `/api/v1/rating/` representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingDto {
    #[serde(flatten)]
    pub fields: CampaignFields,
    pub rating: f64,
    pub request_ip: Option<String>,
}

impl RatingDto {
    pub fn new(campaign: Campaign, request_ip: Option<String>) -> Self {
        Self {
            fields: CampaignFields::new(campaign, ResourceKind::Rating),
            rating: CAMPAIGN_RATING,
            request_ip,
        }
    }
}
