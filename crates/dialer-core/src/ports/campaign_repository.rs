//! Campaign repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Campaign, CampaignFilter, NewCampaign, Page, PageRequest, Scope};

/// Repository for campaign persistence.
///
/// Validation, defaults and ownership rules live in `CampaignService`;
/// implementations only store and query.
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn list(
        &self,
        filter: &CampaignFilter,
        page: PageRequest,
    ) -> Result<Page<Campaign>, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if the campaign doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<Campaign, RepositoryError>;

    /// Number of campaigns owned by `user_id`.
    async fn count_for_user(&self, user_id: i64) -> Result<u64, RepositoryError>;

    /// Whether `user_id` already owns a campaign called `name`.
    async fn name_exists(&self, user_id: i64, name: &str) -> Result<bool, RepositoryError>;

    /// Returns `Err(RepositoryError::AlreadyExists)` on a duplicate code or
    /// duplicate name for the same owner.
    async fn insert(&self, campaign: &NewCampaign) -> Result<Campaign, RepositoryError>;

    async fn update(&self, campaign: &Campaign) -> Result<(), RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Delete every campaign in `scope`, returning how many were removed.
    async fn delete_all(&self, scope: Scope) -> Result<u64, RepositoryError>;
}
