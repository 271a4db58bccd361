//! Gateway repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Gateway, NewGateway, Page, PageRequest};

#[async_trait]
pub trait GatewayRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Page<Gateway>, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if the gateway doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<Gateway, RepositoryError>;

    async fn insert(&self, gateway: &NewGateway) -> Result<Gateway, RepositoryError>;

    async fn update(&self, gateway: &Gateway) -> Result<(), RepositoryError>;

    /// Campaigns referencing the gateway keep existing with no gateway.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}
