//! User service - read access to accounts plus administrative creation.

use std::sync::Arc;

use tracing::info;

use super::AuthService;
use crate::domain::{DialerSettings, NewUser, Page, PageRequest, User, UserFilter};
use crate::ports::{CoreError, RepositoryError, UserRepository};

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    auth: AuthService,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, auth: AuthService) -> Self {
        Self { repo, auth }
    }

    /// Superusers see every account; everyone else only their own.
    pub async fn list(
        &self,
        caller: &User,
        username: Option<String>,
        page: PageRequest,
    ) -> Result<Page<User>, CoreError> {
        if caller.is_superuser {
            let filter = UserFilter { username };
            return Ok(self.repo.list(&filter, page).await?);
        }
        let own = self.repo.get_by_id(caller.id).await?;
        let visible: Vec<User> = Some(own)
            .filter(|u| username.as_deref().is_none_or(|name| name == u.username))
            .into_iter()
            .collect();
        let total = visible.len() as u64;
        let items = if page.offset == 0 { visible } else { Vec::new() };
        Ok(Page::new(items, total, page))
    }

    pub async fn get(&self, caller: &User, id: i64) -> Result<User, CoreError> {
        if !caller.is_superuser && caller.id != id {
            return Err(CoreError::NotFound(format!("user {id}")));
        }
        match self.repo.get_by_id(id).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::NotFound(_)) => Err(CoreError::NotFound(format!("user {id}"))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User, CoreError> {
        match self.repo.get_by_username(username).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::NotFound(_)) => {
                Err(CoreError::NotFound(format!("user {username}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create an account, hashing the password.
    pub async fn create(
        &self,
        username: &str,
        password: &str,
        is_superuser: bool,
    ) -> Result<User, CoreError> {
        if username.trim().is_empty() {
            return Err(CoreError::Validation("username may not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(CoreError::Validation("password may not be empty".to_string()));
        }
        let password_hash = self.auth.hash_password(password).await?;
        let new = NewUser::new(username.trim(), password_hash).superuser(is_superuser);
        let user = self.repo.insert(&new).await?;
        info!(user_id = user.id, username = %user.username, is_superuser, "User created");
        Ok(user)
    }

    pub async fn dialer_settings(&self, user_id: i64) -> Result<Option<DialerSettings>, CoreError> {
        Ok(self.repo.dialer_settings(user_id).await?)
    }

    pub async fn set_dialer_settings(
        &self,
        user_id: i64,
        settings: &DialerSettings,
    ) -> Result<(), CoreError> {
        self.repo.save_dialer_settings(user_id, settings).await?;
        info!(user_id, ?settings, "Dialer settings saved");
        Ok(())
    }
}
