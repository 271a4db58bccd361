//! VoIP application service. Mirrors the gateway rules.

use std::sync::Arc;

use tracing::info;

use super::gateway_service::require_superuser;
use crate::domain::{NewVoipApp, Page, PageRequest, User, VoipApp, VoipAppInput};
use crate::ports::{CoreError, RepositoryError, VoipAppRepository};
use crate::utils::timestamp;

pub struct VoipAppService {
    repo: Arc<dyn VoipAppRepository>,
}

impl VoipAppService {
    pub fn new(repo: Arc<dyn VoipAppRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<VoipApp>, CoreError> {
        Ok(self.repo.list(page).await?)
    }

    pub async fn get(&self, id: i64) -> Result<VoipApp, CoreError> {
        match self.repo.get_by_id(id).await {
            Ok(app) => Ok(app),
            Err(RepositoryError::NotFound(_)) => Err(CoreError::NotFound(format!("voipapp {id}"))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn add(&self, app: &NewVoipApp) -> Result<VoipApp, CoreError> {
        let created = self.repo.insert(app).await?;
        info!(voipapp_id = created.id, name = %created.name, "VoIP application created");
        Ok(created)
    }

    pub async fn create(&self, caller: &User, input: &VoipAppInput) -> Result<VoipApp, CoreError> {
        require_superuser(caller, "creating a VoIP application")?;
        let new = input.normalize_new()?;
        self.add(&new).await
    }

    pub async fn update(
        &self,
        caller: &User,
        id: i64,
        input: &VoipAppInput,
    ) -> Result<VoipApp, CoreError> {
        require_superuser(caller, "updating a VoIP application")?;
        let existing = self.get(id).await?;
        let updated = input.apply_to(&existing, timestamp::now())?;
        self.repo.update(&updated).await?;
        info!(voipapp_id = id, "VoIP application updated");
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: i64) -> Result<(), CoreError> {
        require_superuser(caller, "deleting a VoIP application")?;
        self.get(id).await?;
        self.repo.delete(id).await?;
        info!(voipapp_id = id, "VoIP application deleted");
        Ok(())
    }

    pub async fn delete_all(&self, caller: &User) -> Result<u64, CoreError> {
        require_superuser(caller, "deleting VoIP applications")?;
        Ok(self.repo.delete_all().await?)
    }
}
