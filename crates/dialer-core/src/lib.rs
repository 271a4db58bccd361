//! Core of the outbound dialer campaign API.
//!
//! Holds the domain model (campaigns, phonebooks, gateways, VoIP
//! applications, users), the ports that storage and telephony adapters
//! implement, and the services that validate, normalize and persist
//! records on behalf of an authenticated caller.
//!
//! Adapters live in sibling crates: `dialer-db` (SQLite), `dialer-telephony`
//! (REST call placement), `dialer-axum` (HTTP) and `dialer-cli`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;
pub mod utils;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::{
    API_PREFIX, Campaign, CampaignFilter, CampaignInput, CampaignStatus, DialerLimit,
    DialerSettings, Gateway, GatewayInput, GatewayStatus, NameFilter, NewCampaign, NewGateway,
    NewPhonebook, NewUser, NewVoipApp, Page, PageRequest, Phonebook, PhonebookFilter,
    PhonebookInput, ResourceKind, Scope, User, UserFilter, VoipApp, VoipAppInput, VoipAppType,
};
pub use ports::{
    CallRequest, CallResponse, CampaignRepository, CoreError, GatewayRepository,
    PhonebookRepository, Repos, RepositoryError, TelephonyError, TelephonyPort, TelephonyResult,
    UserRepository, VoipAppRepository,
};
pub use services::{
    AppCore, AuthError, AuthService, CampaignDetail, CampaignService, DispatchService,
    GatewayService, PhonebookService, UserService, VoipAppService,
};
pub use validation::{FieldError, FieldErrorKind, ValidationErrors};
