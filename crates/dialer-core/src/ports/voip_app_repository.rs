//! VoIP application repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewVoipApp, Page, PageRequest, VoipApp};

#[async_trait]
pub trait VoipAppRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Page<VoipApp>, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if the application doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<VoipApp, RepositoryError>;

    async fn insert(&self, app: &NewVoipApp) -> Result<VoipApp, RepositoryError>;

    async fn update(&self, app: &VoipApp) -> Result<(), RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}
