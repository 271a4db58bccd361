//! Core domain types.
//!
//! These types represent the dialer's data model, independent of storage
//! and transport.
//!
//! # Structure
//!
//! - `campaign` - campaigns, pacing, schedules and their input normalization
//! - `phonebook` - phonebooks
//! - `gateway` / `voip_app` - call routing and call handling configuration
//! - `user` - accounts and dialer limits
//! - `resource` - URIs, paging and ownership scope

mod campaign;
mod gateway;
mod phonebook;
mod resource;
mod user;
mod voip_app;

pub use campaign::{
    CAMPAIGN_CODE_LEN, Campaign, CampaignFilter, CampaignInput, CampaignStatus, NameFilter,
    NewCampaign, Pacing, PacingField, ParsedCampaign, WeeklySchedule, apply_campaign_update,
    default_daily_start, default_daily_stop, generate_campaign_code, normalize_new_campaign,
};
pub use gateway::{
    DEFAULT_GATEWAY_CODECS, DEFAULT_GATEWAY_RETRIES, DEFAULT_GATEWAY_TIMEOUTS, Gateway,
    GatewayInput, GatewayStatus, NewGateway,
};
pub use phonebook::{
    NewPhonebook, Phonebook, PhonebookFilter, PhonebookInput, apply_phonebook_update,
    normalize_new_phonebook,
};
pub use resource::{
    API_PREFIX, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Page, PageRequest, ResourceKind, Scope,
};
pub use user::{DialerLimit, DialerSettings, NewUser, User, UserFilter};
pub use voip_app::{NewVoipApp, VoipApp, VoipAppInput, VoipAppType};
