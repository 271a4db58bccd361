//! Campaign service - validation, normalization and CRUD for campaigns.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::campaign_validation::{CampaignValidator, ValidationMode};
use crate::domain::{
    Campaign, CampaignFilter, CampaignInput, CampaignStatus, Gateway, NameFilter, Page,
    PageRequest, Scope, User, VoipApp, apply_campaign_update, generate_campaign_code,
    normalize_new_campaign,
};
use crate::ports::{
    CampaignRepository, CoreError, GatewayRepository, Repos, RepositoryError, UserRepository,
    VoipAppRepository,
};
use crate::utils::timestamp;
use crate::validation::{FieldError, FieldErrorKind, ValidationErrors};

/// Attempts at finding an unused campaign code before giving up.
const MAX_CODE_ATTEMPTS: usize = 5;

/// A campaign with its references resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDetail {
    pub campaign: Campaign,
    pub owner: Option<User>,
    pub aleg_gateway: Option<Gateway>,
    pub voipapp: Option<VoipApp>,
}

pub struct CampaignService {
    campaigns: Arc<dyn CampaignRepository>,
    users: Arc<dyn UserRepository>,
    gateways: Arc<dyn GatewayRepository>,
    voip_apps: Arc<dyn VoipAppRepository>,
    validator: CampaignValidator,
}

/// Map a lookup miss to `None` and keep real failures.
fn optional<T>(result: Result<T, RepositoryError>) -> Result<Option<T>, CoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RepositoryError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl CampaignService {
    pub fn new(repos: &Repos) -> Self {
        Self {
            campaigns: repos.campaigns.clone(),
            users: repos.users.clone(),
            gateways: repos.gateways.clone(),
            voip_apps: repos.voip_apps.clone(),
            validator: CampaignValidator::new(repos),
        }
    }

    /// List campaigns visible to `caller`.
    pub async fn list(
        &self,
        caller: &User,
        name: Option<NameFilter>,
        status: Option<CampaignStatus>,
        page: PageRequest,
    ) -> Result<Page<Campaign>, CoreError> {
        let filter = CampaignFilter {
            scope: Scope::for_user(caller),
            name,
            status,
        };
        Ok(self.campaigns.list(&filter, page).await?)
    }

    /// Fetch one campaign. Records owned by someone else are reported as
    /// not found to non-superusers.
    pub async fn get(&self, caller: &User, id: i64) -> Result<Campaign, CoreError> {
        let campaign = optional(self.campaigns.get_by_id(id).await)?
            .filter(|c| Scope::for_user(caller).permits(c.user_id))
            .ok_or_else(|| CoreError::NotFound(format!("campaign {id}")))?;
        Ok(campaign)
    }

    /// Resolve owner, gateway and application for a page of campaigns.
    pub async fn expand(&self, page: Page<Campaign>) -> Result<Page<CampaignDetail>, CoreError> {
        let mut users: HashMap<i64, Option<User>> = HashMap::new();
        let mut gateways: HashMap<i64, Option<Gateway>> = HashMap::new();
        let mut apps: HashMap<i64, Option<VoipApp>> = HashMap::new();
        let mut details = Vec::with_capacity(page.items.len());

        for campaign in &page.items {
            if !users.contains_key(&campaign.user_id) {
                let user = optional(self.users.get_by_id(campaign.user_id).await)?;
                users.insert(campaign.user_id, user);
            }
            if let Some(id) = campaign.aleg_gateway_id {
                if !gateways.contains_key(&id) {
                    gateways.insert(id, optional(self.gateways.get_by_id(id).await)?);
                }
            }
            if let Some(id) = campaign.voipapp_id {
                if !apps.contains_key(&id) {
                    apps.insert(id, optional(self.voip_apps.get_by_id(id).await)?);
                }
            }
            details.push(CampaignDetail {
                campaign: campaign.clone(),
                owner: users.get(&campaign.user_id).cloned().flatten(),
                aleg_gateway: campaign
                    .aleg_gateway_id
                    .and_then(|id| gateways.get(&id).cloned().flatten()),
                voipapp: campaign
                    .voipapp_id
                    .and_then(|id| apps.get(&id).cloned().flatten()),
            });
        }

        Ok(Page {
            items: details,
            total_count: page.total_count,
            limit: page.limit,
            offset: page.offset,
        })
    }

    pub async fn get_detail(&self, caller: &User, id: i64) -> Result<CampaignDetail, CoreError> {
        let campaign = self.get(caller, id).await?;
        let page = Page::new(vec![campaign], 1, PageRequest::new(Some(1), None));
        self.expand(page)
            .await?
            .items
            .pop()
            .ok_or_else(|| CoreError::Internal(format!("campaign {id} vanished during expansion")))
    }

    /// Validate, normalize and store a new campaign owned by `caller`.
    pub async fn create(
        &self,
        caller: &User,
        input: &CampaignInput,
    ) -> Result<Campaign, CoreError> {
        let errors = self
            .validator
            .validate(caller, input, ValidationMode::Create)
            .await?;
        if !errors.is_empty() {
            debug!(user = %caller.username, rejected = %errors, "Campaign create rejected");
            return Err(CoreError::InvalidFields(errors));
        }

        let now = timestamp::now();
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let new = normalize_new_campaign(input, caller.id, now, generate_campaign_code())?;
            match self.campaigns.insert(&new).await {
                Ok(campaign) => {
                    info!(
                        campaign_id = campaign.id,
                        code = %campaign.campaign_code,
                        user = %caller.username,
                        "Campaign created"
                    );
                    return Ok(campaign);
                }
                Err(RepositoryError::AlreadyExists(detail)) => {
                    if self.campaigns.name_exists(caller.id, &new.name).await? {
                        let mut errors = ValidationErrors::new();
                        errors.add(
                            "chk_campaign_name",
                            FieldError::new(
                                FieldErrorKind::Duplicate,
                                "The Campaign name duplicated!",
                            ),
                        );
                        return Err(CoreError::InvalidFields(errors));
                    }
                    warn!(attempt, %detail, "Campaign code collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(CoreError::Internal(
            "could not allocate a unique campaign code".to_string(),
        ))
    }

    /// Validate and apply a partial update.
    pub async fn update(
        &self,
        caller: &User,
        id: i64,
        input: &CampaignInput,
    ) -> Result<Campaign, CoreError> {
        let existing = self.get(caller, id).await?;
        let errors = self
            .validator
            .validate(caller, input, ValidationMode::Update)
            .await?;
        if !errors.is_empty() {
            return Err(CoreError::InvalidFields(errors));
        }
        let updated = apply_campaign_update(&existing, input, timestamp::now())?;
        self.campaigns.update(&updated).await?;
        info!(campaign_id = id, user = %caller.username, "Campaign updated");
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: i64) -> Result<(), CoreError> {
        let campaign = self.get(caller, id).await?;
        self.campaigns.delete(campaign.id).await?;
        info!(campaign_id = id, user = %caller.username, "Campaign deleted");
        Ok(())
    }

    /// Delete every campaign visible to `caller`.
    pub async fn delete_all(&self, caller: &User) -> Result<u64, CoreError> {
        let removed = self.campaigns.delete_all(Scope::for_user(caller)).await?;
        info!(removed, user = %caller.username, "Campaign collection deleted");
        Ok(removed)
    }
}
