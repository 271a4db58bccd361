//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports and domain logic. They enforce
//! ownership scoping, run validation passes and log every mutation.

mod app_core;
mod auth_service;
mod campaign_service;
mod campaign_validation;
mod dispatch_service;
mod gateway_service;
mod phonebook_service;
mod user_service;
mod voip_app_service;

#[cfg(test)]
pub(crate) mod testing;

pub use app_core::AppCore;
pub use auth_service::{AuthError, AuthService, MIN_PASSWORD_COST};
pub use campaign_service::{CampaignDetail, CampaignService};
pub use campaign_validation::{CampaignValidator, ValidationMode};
pub use dispatch_service::DispatchService;
pub use gateway_service::GatewayService;
pub use phonebook_service::{PhonebookService, PhonebookValidator};
pub use user_service::UserService;
pub use voip_app_service::VoipAppService;
