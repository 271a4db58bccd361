//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repository traits are CRUD-focused; rules live in services
//! - Ownership scoping is passed in explicitly, never inferred by storage

pub mod campaign_repository;
pub mod gateway_repository;
pub mod phonebook_repository;
pub mod telephony;
pub mod user_repository;
pub mod voip_app_repository;

use std::sync::Arc;
use thiserror::Error;

pub use campaign_repository::CampaignRepository;
pub use gateway_repository::GatewayRepository;
pub use phonebook_repository::PhonebookRepository;
pub use telephony::{CallRequest, CallResponse, TelephonyError, TelephonyPort, TelephonyResult};
pub use user_repository::UserRepository;
pub use voip_app_repository::VoipAppRepository;

use crate::validation::ValidationErrors;

/// Container for all repository trait objects.
///
/// Lives in `dialer-core` so that `AppCore` can accept it without depending
/// on `dialer-db`.
///
/// # Example
///
/// ```ignore
/// // In dialer-db factory:
/// pub fn build_repos(pool: SqlitePool) -> Repos { ... }
///
/// // In adapter bootstrap:
/// let repos = dialer_db::CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos, telephony);
/// ```
#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn UserRepository>,
    pub campaigns: Arc<dyn CampaignRepository>,
    pub phonebooks: Arc<dyn PhonebookRepository>,
    pub gateways: Arc<dyn GatewayRepository>,
    pub voip_apps: Arc<dyn VoipAppRepository>,
}

impl Repos {
    pub fn new(
        users: Arc<dyn UserRepository>,
        campaigns: Arc<dyn CampaignRepository>,
        phonebooks: Arc<dyn PhonebookRepository>,
        gateways: Arc<dyn GatewayRepository>,
        voip_apps: Arc<dyn VoipAppRepository>,
    ) -> Self {
        Self {
            users,
            campaigns,
            phonebooks,
            gateways,
            voip_apps,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, CLI exit
/// codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Submitted fields were rejected. Nothing was persisted.
    #[error("Validation failed: {0}")]
    InvalidFields(ValidationErrors),

    /// Validation error (invalid input) without field detail.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The record does not exist or is not visible to the caller.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller may not perform this operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Placing a call failed.
    #[error(transparent)]
    Telephony(#[from] TelephonyError),

    /// Credential handling failed.
    #[error(transparent)]
    Auth(#[from] crate::services::AuthError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidFields(errors)
    }
}
