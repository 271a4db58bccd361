//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, HTTP)
//! receive an `AppCore` instance and use it to access all functionality.

use std::sync::Arc;

use crate::ports::{Repos, TelephonyPort};

use super::{
    AuthService, CampaignService, DispatchService, GatewayService, PhonebookService, UserService,
    VoipAppService,
};

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let repos = dialer_db::CoreFactory::build_repos(pool);
/// let telephony = Arc::new(DefaultTelephonyClient::with_config(config)?);
/// let core = AppCore::new(repos, telephony);
///
/// let page = core.campaigns().list(&caller, None, None, PageRequest::default()).await?;
/// ```
pub struct AppCore {
    repos: Repos,
    auth: AuthService,
    users: UserService,
    campaigns: CampaignService,
    phonebooks: PhonebookService,
    gateways: GatewayService,
    voip_apps: VoipAppService,
    dispatch: DispatchService,
}

impl AppCore {
    pub fn new(repos: Repos, telephony: Arc<dyn TelephonyPort>) -> Self {
        let auth = AuthService::new(repos.users.clone());
        Self {
            users: UserService::new(repos.users.clone(), auth.clone()),
            campaigns: CampaignService::new(&repos),
            phonebooks: PhonebookService::new(&repos),
            gateways: GatewayService::new(repos.gateways.clone()),
            voip_apps: VoipAppService::new(repos.voip_apps.clone()),
            dispatch: DispatchService::new(&repos, telephony),
            auth,
            repos,
        }
    }

    /// Use a different bcrypt cost for new password hashes.
    #[must_use]
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.auth = self.auth.with_cost(cost);
        self.users = UserService::new(self.repos.users.clone(), self.auth.clone());
        self
    }

    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub const fn users(&self) -> &UserService {
        &self.users
    }

    pub const fn campaigns(&self) -> &CampaignService {
        &self.campaigns
    }

    pub const fn phonebooks(&self) -> &PhonebookService {
        &self.phonebooks
    }

    pub const fn gateways(&self) -> &GatewayService {
        &self.gateways
    }

    pub const fn voip_apps(&self) -> &VoipAppService {
        &self.voip_apps
    }

    pub const fn dispatch(&self) -> &DispatchService {
        &self.dispatch
    }
}
