//! Credential verification against the local user store.

use std::sync::Arc;

use bcrypt::{DEFAULT_COST, hash, verify};
use thiserror::Error;
use tracing::debug;

use crate::domain::User;
use crate::ports::{RepositoryError, UserRepository};

/// Cheapest cost bcrypt accepts. Meant for tests and local tooling.
pub const MIN_PASSWORD_COST: u32 = 4;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Hashes and checks passwords with bcrypt.
///
/// bcrypt is CPU bound, so both operations run on the blocking pool.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            cost: DEFAULT_COST,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost.max(MIN_PASSWORD_COST);
        self
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Resolve `username` / `password` to a user and record the login.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let (user, password_hash) = match self.users.credentials(username).await {
            Ok(found) => found,
            Err(RepositoryError::NotFound(_)) => {
                debug!(%username, "Login for unknown user");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            // A malformed stored hash is treated as a failed login.
            .unwrap_or(false);
        if !valid {
            debug!(%username, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.users.touch_last_login(user.id).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::FakeStore;

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let store = FakeStore::new();
        let user = store.add_user("alice", false, None);
        let auth = AuthService::new(store.clone()).with_cost(MIN_PASSWORD_COST);
        let hashed = auth.hash_password("s3cret").await.unwrap();
        store.set_password_hash(user.id, &hashed);

        let found = auth.authenticate("alice", "s3cret").await.unwrap();
        assert_eq!(found.id, user.id);

        assert!(matches!(
            auth.authenticate("alice", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.authenticate("nobody", "s3cret").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_malformed_hash_is_rejected() {
        let store = FakeStore::new();
        let user = store.add_user("bob", false, None);
        store.set_password_hash(user.id, "not-a-bcrypt-hash");
        let auth = AuthService::new(store.clone()).with_cost(MIN_PASSWORD_COST);

        assert!(matches!(
            auth.authenticate("bob", "anything").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
