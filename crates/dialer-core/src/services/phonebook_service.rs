//! Phonebook service and its validation pass.

use std::sync::Arc;

use tracing::info;

use super::campaign_validation::{ValidationMode, check_caller};
use crate::domain::{
    NameFilter, Page, PageRequest, Phonebook, PhonebookFilter, PhonebookInput, Scope, User,
    apply_phonebook_update, normalize_new_phonebook,
};
use crate::ports::{
    CampaignRepository, CoreError, PhonebookRepository, Repos, RepositoryError, UserRepository,
};
use crate::utils::timestamp;
use crate::validation::{FieldError, FieldErrorKind, ValidationErrors};

pub struct PhonebookValidator {
    users: Arc<dyn UserRepository>,
    campaigns: Arc<dyn CampaignRepository>,
}

impl PhonebookValidator {
    pub fn new(repos: &Repos) -> Self {
        Self {
            users: repos.users.clone(),
            campaigns: repos.campaigns.clone(),
        }
    }

    /// The referenced campaign must exist and be visible to the caller.
    pub async fn validate(
        &self,
        caller: &User,
        input: &PhonebookInput,
        mode: ValidationMode,
    ) -> Result<ValidationErrors, CoreError> {
        let mut errors = ValidationErrors::new();

        if mode == ValidationMode::Create
            && input.name.as_deref().is_none_or(|n| n.trim().is_empty())
        {
            errors.add("name", FieldError::missing());
        }

        match input.campaign_ref() {
            Err(e) => errors.add("chk_campaign", e),
            Ok(Some(id)) => {
                let visible = match self.campaigns.get_by_id(id).await {
                    Ok(campaign) => Scope::for_user(caller).permits(campaign.user_id),
                    Err(RepositoryError::NotFound(_)) => false,
                    Err(e) => return Err(e.into()),
                };
                if !visible {
                    errors.add(
                        "chk_campaign",
                        FieldError::new(
                            FieldErrorKind::NotFound,
                            "The Campaign ID does not exist!",
                        ),
                    );
                }
            }
            Ok(None) => {}
        }

        check_caller(self.users.as_ref(), caller, &mut errors).await?;
        Ok(errors)
    }
}

pub struct PhonebookService {
    phonebooks: Arc<dyn PhonebookRepository>,
    validator: PhonebookValidator,
}

impl PhonebookService {
    pub fn new(repos: &Repos) -> Self {
        Self {
            phonebooks: repos.phonebooks.clone(),
            validator: PhonebookValidator::new(repos),
        }
    }

    pub async fn list(
        &self,
        caller: &User,
        name: Option<NameFilter>,
        page: PageRequest,
    ) -> Result<Page<Phonebook>, CoreError> {
        let filter = PhonebookFilter {
            scope: Scope::for_user(caller),
            name,
        };
        Ok(self.phonebooks.list(&filter, page).await?)
    }

    pub async fn get(&self, caller: &User, id: i64) -> Result<Phonebook, CoreError> {
        match self.phonebooks.get_by_id(id).await {
            Ok(p) if Scope::for_user(caller).permits(p.user_id) => Ok(p),
            Ok(_) | Err(RepositoryError::NotFound(_)) => {
                Err(CoreError::NotFound(format!("phonebook {id}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn create(
        &self,
        caller: &User,
        input: &PhonebookInput,
    ) -> Result<Phonebook, CoreError> {
        let errors = self
            .validator
            .validate(caller, input, ValidationMode::Create)
            .await?;
        errors.into_result()?;

        let new = normalize_new_phonebook(input, caller.id)?;
        let phonebook = self.phonebooks.insert(&new).await?;
        info!(phonebook_id = phonebook.id, user = %caller.username, "Phonebook created");
        Ok(phonebook)
    }

    pub async fn update(
        &self,
        caller: &User,
        id: i64,
        input: &PhonebookInput,
    ) -> Result<Phonebook, CoreError> {
        let existing = self.get(caller, id).await?;
        let errors = self
            .validator
            .validate(caller, input, ValidationMode::Update)
            .await?;
        errors.into_result()?;

        let updated = apply_phonebook_update(&existing, input, timestamp::now())?;
        self.phonebooks.update(&updated).await?;
        info!(phonebook_id = id, user = %caller.username, "Phonebook updated");
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: i64) -> Result<(), CoreError> {
        let phonebook = self.get(caller, id).await?;
        self.phonebooks.delete(phonebook.id).await?;
        info!(phonebook_id = id, user = %caller.username, "Phonebook deleted");
        Ok(())
    }

    pub async fn delete_all(&self, caller: &User) -> Result<u64, CoreError> {
        let removed = self.phonebooks.delete_all(Scope::for_user(caller)).await?;
        info!(removed, user = %caller.username, "Phonebook collection deleted");
        Ok(removed)
    }
}
