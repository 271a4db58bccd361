//! Phonebook repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewPhonebook, Page, PageRequest, Phonebook, PhonebookFilter, Scope};

#[async_trait]
pub trait PhonebookRepository: Send + Sync {
    async fn list(
        &self,
        filter: &PhonebookFilter,
        page: PageRequest,
    ) -> Result<Page<Phonebook>, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if the phonebook doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<Phonebook, RepositoryError>;

    async fn insert(&self, phonebook: &NewPhonebook) -> Result<Phonebook, RepositoryError>;

    async fn update(&self, phonebook: &Phonebook) -> Result<(), RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    async fn delete_all(&self, scope: Scope) -> Result<u64, RepositoryError>;
}
