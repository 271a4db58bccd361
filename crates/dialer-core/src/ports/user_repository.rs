//! User repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{DialerSettings, NewUser, Page, PageRequest, User, UserFilter};

/// Repository for accounts and their dialer settings.
///
/// Password hashes only cross this boundary through [`credentials`] and
/// [`insert`]; every other method returns [`User`], which carries none.
///
/// [`credentials`]: UserRepository::credentials
/// [`insert`]: UserRepository::insert
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self, filter: &UserFilter, page: PageRequest)
    -> Result<Page<User>, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if the user doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if no user has that name.
    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError>;

    /// Look up a user together with their password hash.
    async fn credentials(&self, username: &str) -> Result<(User, String), RepositoryError>;

    /// Returns `Err(RepositoryError::AlreadyExists)` for a taken username.
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Record a successful login.
    async fn touch_last_login(&self, id: i64) -> Result<(), RepositoryError>;

    /// Dialer settings attached to the user, `None` when not configured.
    async fn dialer_settings(&self, user_id: i64)
    -> Result<Option<DialerSettings>, RepositoryError>;

    /// Create or replace the user's dialer settings.
    async fn save_dialer_settings(
        &self,
        user_id: i64,
        settings: &DialerSettings,
    ) -> Result<(), RepositoryError>;
}
