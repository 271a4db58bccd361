//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the application
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use dialer_core::ports::TelephonyPort;
use dialer_core::{AppCore, Repos};

use crate::repositories::{
    SqliteCampaignRepository, SqliteGatewayRepository, SqlitePhonebookRepository,
    SqliteUserRepository, SqliteVoipAppRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteCampaignRepository::new(pool.clone())),
            Arc::new(SqlitePhonebookRepository::new(pool.clone())),
            Arc::new(SqliteGatewayRepository::new(pool.clone())),
            Arc::new(SqliteVoipAppRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` instance from a pool and telephony client.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// let repos = CoreFactory::build_repos(pool);
    /// let core = AppCore::new(repos, telephony);
    /// ```
    ///
    /// # Example
    ///
    /// ```ignore
    /// use dialer_db::{CoreFactory, setup_database};
    /// use dialer_telephony::{DefaultTelephonyClient, TelephonyConfig};
    ///
    /// let pool = setup_database(&db_path).await?;
    /// let telephony = Arc::new(DefaultTelephonyClient::with_config(TelephonyConfig::default())?);
    /// let core = CoreFactory::build_app_core(pool, telephony);
    /// ```
    pub fn build_app_core(pool: SqlitePool, telephony: Arc<dyn TelephonyPort>) -> AppCore {
        let repos = Self::build_repos(pool);
        AppCore::new(repos, telephony)
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema
/// already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All repositories over this database, ready for `AppCore::new`.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }

    pub fn user_repository(&self) -> SqliteUserRepository {
        SqliteUserRepository::new(self.pool.clone())
    }

    pub fn campaign_repository(&self) -> SqliteCampaignRepository {
        SqliteCampaignRepository::new(self.pool.clone())
    }

    pub fn phonebook_repository(&self) -> SqlitePhonebookRepository {
        SqlitePhonebookRepository::new(self.pool.clone())
    }

    pub fn gateway_repository(&self) -> SqliteGatewayRepository {
        SqliteGatewayRepository::new(self.pool.clone())
    }

    pub fn voip_app_repository(&self) -> SqliteVoipAppRepository {
        SqliteVoipAppRepository::new(self.pool.clone())
    }
}
