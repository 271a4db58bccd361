//! SQLite persistence for the dialer campaign API.
//!
//! Implements every repository port declared in `dialer-core` on top of a
//! `sqlx` [`SqlitePool`](sqlx::SqlitePool). Entry points call
//! [`setup_database`] once and hand the pool to [`CoreFactory`].

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{
    SqliteCampaignRepository, SqliteGatewayRepository, SqlitePhonebookRepository,
    SqliteUserRepository, SqliteVoipAppRepository,
};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
