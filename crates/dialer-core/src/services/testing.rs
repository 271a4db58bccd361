//! In-memory port fakes shared by service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    Campaign, CampaignFilter, DialerSettings, Gateway, NameFilter, NewCampaign, NewGateway,
    NewPhonebook, NewUser, NewVoipApp, Page, PageRequest, Phonebook, PhonebookFilter, Scope, User,
    UserFilter, VoipApp,
};
use crate::ports::{
    CampaignRepository, GatewayRepository, PhonebookRepository, Repos, RepositoryError,
    UserRepository, VoipAppRepository,
};
use crate::utils::timestamp;

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<(User, String)>,
    settings: HashMap<i64, DialerSettings>,
    campaigns: Vec<Campaign>,
    phonebooks: Vec<Phonebook>,
    gateways: Vec<Gateway>,
    voip_apps: Vec<VoipApp>,
}

impl State {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// One store implementing every repository port.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

fn page<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let selected = items
        .iter()
        .skip(request.offset as usize)
        .take(request.limit as usize)
        .cloned()
        .collect();
    Page::new(selected, items.len() as u64, request)
}

fn name_matches(filter: Option<&NameFilter>, name: &str) -> bool {
    match filter {
        None => true,
        Some(NameFilter::Exact(wanted)) => wanted == name,
        Some(NameFilter::Contains(part)) => name.to_lowercase().contains(&part.to_lowercase()),
    }
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repos(self: &Arc<Self>) -> Repos {
        Repos::new(
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        )
    }

    /// Add a user with a known password hash and optional dialer settings.
    pub fn add_user(
        &self,
        username: &str,
        superuser: bool,
        settings: Option<DialerSettings>,
    ) -> User {
        let mut state = self.state.lock().unwrap();
        let id = state.id();
        let user = User {
            id,
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            last_login: None,
            is_superuser: superuser,
            date_joined: timestamp::now(),
        };
        state.users.push((user.clone(), String::new()));
        if let Some(settings) = settings {
            state.settings.insert(id, settings);
        }
        user
    }

    pub fn add_gateway(&self, name: &str) -> Gateway {
        let mut state = self.state.lock().unwrap();
        let id = state.id();
        let new = NewGateway::new(name, "sofia/gateway/test/");
        let gateway = gateway_from(id, new);
        state.gateways.push(gateway.clone());
        gateway
    }

    pub fn add_voip_app(&self, name: &str) -> VoipApp {
        let mut state = self.state.lock().unwrap();
        let id = state.id();
        let new = NewVoipApp::new(name, crate::domain::VoipAppType::PlayAudio, "");
        let app = voip_app_from(id, new);
        state.voip_apps.push(app.clone());
        app
    }

    pub fn set_password_hash(&self, user_id: i64, hash: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(entry) = state.users.iter_mut().find(|(u, _)| u.id == user_id) {
            entry.1 = hash.to_string();
        }
    }

    pub fn campaign_count(&self) -> usize {
        self.state.lock().unwrap().campaigns.len()
    }

    pub fn phonebook_count(&self) -> usize {
        self.state.lock().unwrap().phonebooks.len()
    }
}

fn gateway_from(id: i64, new: NewGateway) -> Gateway {
    let now = timestamp::now();
    Gateway {
        id,
        name: new.name,
        description: new.description,
        gateways: new.gateways,
        gateway_codecs: new.gateway_codecs,
        gateway_timeouts: new.gateway_timeouts,
        gateway_retries: new.gateway_retries,
        maximum_call: new.maximum_call,
        status: new.status,
        created_date: now,
        updated_date: now,
    }
}

fn voip_app_from(id: i64, new: NewVoipApp) -> VoipApp {
    let now = timestamp::now();
    VoipApp {
        id,
        name: new.name,
        description: new.description,
        app_type: new.app_type,
        data: new.data,
        created_date: now,
        updated_date: now,
    }
}

fn not_found(what: &str, id: i64) -> RepositoryError {
    RepositoryError::NotFound(format!("{what} id={id}"))
}

#[async_trait]
impl UserRepository for FakeStore {
    async fn list(
        &self,
        filter: &UserFilter,
        request: PageRequest,
    ) -> Result<Page<User>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let users: Vec<User> = state
            .users
            .iter()
            .map(|(u, _)| u.clone())
            .filter(|u| filter.username.as_ref().is_none_or(|name| *name == u.username))
            .collect();
        Ok(page(&users, request))
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| not_found("user", id))
    }

    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError> {
        self.credentials(username).await.map(|(user, _)| user)
    }

    async fn credentials(&self, username: &str) -> Result<(User, String), RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|(u, _)| u.username == username)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("user {username}")))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(RepositoryError::AlreadyExists(user.username.clone()));
        }
        let id = state.id();
        let created = User {
            id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            last_login: None,
            is_superuser: user.is_superuser,
            date_joined: timestamp::now(),
        };
        state.users.push((created.clone(), user.password_hash.clone()));
        Ok(created)
    }

    async fn touch_last_login(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let entry = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or_else(|| not_found("user", id))?;
        entry.0.last_login = Some(timestamp::now());
        Ok(())
    }

    async fn dialer_settings(
        &self,
        user_id: i64,
    ) -> Result<Option<DialerSettings>, RepositoryError> {
        Ok(self.state.lock().unwrap().settings.get(&user_id).copied())
    }

    async fn save_dialer_settings(
        &self,
        user_id: i64,
        settings: &DialerSettings,
    ) -> Result<(), RepositoryError> {
        self.state.lock().unwrap().settings.insert(user_id, *settings);
        Ok(())
    }
}

#[async_trait]
impl CampaignRepository for FakeStore {
    async fn list(
        &self,
        filter: &CampaignFilter,
        request: PageRequest,
    ) -> Result<Page<Campaign>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let matching: Vec<Campaign> = state
            .campaigns
            .iter()
            .filter(|c| filter.scope.permits(c.user_id))
            .filter(|c| name_matches(filter.name.as_ref(), &c.name))
            .filter(|c| filter.status.is_none_or(|s| s == c.status))
            .cloned()
            .collect();
        Ok(page(&matching, request))
    }

    async fn get_by_id(&self, id: i64) -> Result<Campaign, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .campaigns
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("campaign", id))
    }

    async fn count_for_user(&self, user_id: i64) -> Result<u64, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.campaigns.iter().filter(|c| c.user_id == user_id).count() as u64)
    }

    async fn name_exists(&self, user_id: i64, name: &str) -> Result<bool, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .campaigns
            .iter()
            .any(|c| c.user_id == user_id && c.name == name))
    }

    async fn insert(&self, new: &NewCampaign) -> Result<Campaign, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state
            .campaigns
            .iter()
            .any(|c| {
                c.campaign_code == new.campaign_code
                    || (c.user_id == new.user_id && c.name == new.name)
            })
        {
            return Err(RepositoryError::AlreadyExists(new.name.clone()));
        }
        let id = state.id();
        let now = timestamp::now();
        let campaign = Campaign {
            id,
            campaign_code: new.campaign_code.clone(),
            name: new.name.clone(),
            description: new.description.clone(),
            callerid: new.callerid.clone(),
            status: new.status,
            startingdate: new.startingdate,
            expirationdate: new.expirationdate,
            daily_start_time: new.daily_start_time,
            daily_stop_time: new.daily_stop_time,
            schedule: new.schedule,
            pacing: new.pacing,
            aleg_gateway_id: new.aleg_gateway_id,
            voipapp_id: new.voipapp_id,
            extra_data: new.extra_data.clone(),
            user_id: new.user_id,
            created_date: now,
            updated_date: now,
        };
        state.campaigns.push(campaign.clone());
        Ok(campaign)
    }

    async fn update(&self, campaign: &Campaign) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .campaigns
            .iter_mut()
            .find(|c| c.id == campaign.id)
            .ok_or_else(|| not_found("campaign", campaign.id))?;
        *slot = campaign.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.campaigns.len();
        state.campaigns.retain(|c| c.id != id);
        if state.campaigns.len() == before {
            return Err(not_found("campaign", id));
        }
        Ok(())
    }

    async fn delete_all(&self, scope: Scope) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.campaigns.len();
        state.campaigns.retain(|c| !scope.permits(c.user_id));
        Ok((before - state.campaigns.len()) as u64)
    }
}

#[async_trait]
impl PhonebookRepository for FakeStore {
    async fn list(
        &self,
        filter: &PhonebookFilter,
        request: PageRequest,
    ) -> Result<Page<Phonebook>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let matching: Vec<Phonebook> = state
            .phonebooks
            .iter()
            .filter(|p| filter.scope.permits(p.user_id))
            .filter(|p| name_matches(filter.name.as_ref(), &p.name))
            .cloned()
            .collect();
        Ok(page(&matching, request))
    }

    async fn get_by_id(&self, id: i64) -> Result<Phonebook, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .phonebooks
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("phonebook", id))
    }

    async fn insert(&self, new: &NewPhonebook) -> Result<Phonebook, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let id = state.id();
        let now = timestamp::now();
        let phonebook = Phonebook {
            id,
            name: new.name.clone(),
            description: new.description.clone(),
            campaign_id: new.campaign_id,
            user_id: new.user_id,
            created_date: now,
            updated_date: now,
        };
        state.phonebooks.push(phonebook.clone());
        Ok(phonebook)
    }

    async fn update(&self, phonebook: &Phonebook) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .phonebooks
            .iter_mut()
            .find(|p| p.id == phonebook.id)
            .ok_or_else(|| not_found("phonebook", phonebook.id))?;
        *slot = phonebook.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.phonebooks.len();
        state.phonebooks.retain(|p| p.id != id);
        if state.phonebooks.len() == before {
            return Err(not_found("phonebook", id));
        }
        Ok(())
    }

    async fn delete_all(&self, scope: Scope) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.phonebooks.len();
        state.phonebooks.retain(|p| !scope.permits(p.user_id));
        Ok((before - state.phonebooks.len()) as u64)
    }
}

#[async_trait]
impl GatewayRepository for FakeStore {
    async fn list(&self, request: PageRequest) -> Result<Page<Gateway>, RepositoryError> {
        Ok(page(&self.state.lock().unwrap().gateways, request))
    }

    async fn get_by_id(&self, id: i64) -> Result<Gateway, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .gateways
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| not_found("gateway", id))
    }

    async fn insert(&self, new: &NewGateway) -> Result<Gateway, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let id = state.id();
        let gateway = gateway_from(id, new.clone());
        state.gateways.push(gateway.clone());
        Ok(gateway)
    }

    async fn update(&self, gateway: &Gateway) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .gateways
            .iter_mut()
            .find(|g| g.id == gateway.id)
            .ok_or_else(|| not_found("gateway", gateway.id))?;
        *slot = gateway.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.gateways.len();
        state.gateways.retain(|g| g.id != id);
        if state.gateways.len() == before {
            return Err(not_found("gateway", id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let removed = state.gateways.len() as u64;
        state.gateways.clear();
        Ok(removed)
    }
}

#[async_trait]
impl VoipAppRepository for FakeStore {
    async fn list(&self, request: PageRequest) -> Result<Page<VoipApp>, RepositoryError> {
        Ok(page(&self.state.lock().unwrap().voip_apps, request))
    }

    async fn get_by_id(&self, id: i64) -> Result<VoipApp, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .voip_apps
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found("voipapp", id))
    }

    async fn insert(&self, new: &NewVoipApp) -> Result<VoipApp, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let id = state.id();
        let app = voip_app_from(id, new.clone());
        state.voip_apps.push(app.clone());
        Ok(app)
    }

    async fn update(&self, app: &VoipApp) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .voip_apps
            .iter_mut()
            .find(|a| a.id == app.id)
            .ok_or_else(|| not_found("voipapp", app.id))?;
        *slot = app.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.voip_apps.len();
        state.voip_apps.retain(|a| a.id != id);
        if state.voip_apps.len() == before {
            return Err(not_found("voipapp", id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let removed = state.voip_apps.len() as u64;
        state.voip_apps.clear();
        Ok(removed)
    }
}
