//! Gateway service. Any authenticated user may read; only superusers write.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Gateway, GatewayInput, NewGateway, Page, PageRequest, User};
use crate::ports::{CoreError, GatewayRepository, RepositoryError};
use crate::utils::timestamp;

pub(crate) fn require_superuser(caller: &User, action: &str) -> Result<(), CoreError> {
    if caller.is_superuser {
        Ok(())
    } else {
        Err(CoreError::PermissionDenied(format!(
            "{action} requires a superuser account"
        )))
    }
}

pub struct GatewayService {
    repo: Arc<dyn GatewayRepository>,
}

impl GatewayService {
    pub fn new(repo: Arc<dyn GatewayRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Gateway>, CoreError> {
        Ok(self.repo.list(page).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Gateway, CoreError> {
        match self.repo.get_by_id(id).await {
            Ok(gateway) => Ok(gateway),
            Err(RepositoryError::NotFound(_)) => Err(CoreError::NotFound(format!("gateway {id}"))),
            Err(e) => Err(e.into()),
        }
    }

    /// Store an already-normalized gateway. Used by administrative tooling.
    pub async fn add(&self, gateway: &NewGateway) -> Result<Gateway, CoreError> {
        let created = self.repo.insert(gateway).await?;
        info!(gateway_id = created.id, name = %created.name, "Gateway created");
        Ok(created)
    }

    pub async fn create(&self, caller: &User, input: &GatewayInput) -> Result<Gateway, CoreError> {
        require_superuser(caller, "creating a gateway")?;
        let new = input.normalize_new()?;
        self.add(&new).await
    }

    pub async fn update(
        &self,
        caller: &User,
        id: i64,
        input: &GatewayInput,
    ) -> Result<Gateway, CoreError> {
        require_superuser(caller, "updating a gateway")?;
        let existing = self.get(id).await?;
        let updated = input.apply_to(&existing, timestamp::now())?;
        self.repo.update(&updated).await?;
        info!(gateway_id = id, "Gateway updated");
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: i64) -> Result<(), CoreError> {
        require_superuser(caller, "deleting a gateway")?;
        self.get(id).await?;
        self.repo.delete(id).await?;
        info!(gateway_id = id, "Gateway deleted");
        Ok(())
    }

    pub async fn delete_all(&self, caller: &User) -> Result<u64, CoreError> {
        require_superuser(caller, "deleting gateways")?;
        Ok(self.repo.delete_all().await?)
    }
}
