//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_campaign_repository;
mod sqlite_gateway_repository;
mod sqlite_phonebook_repository;
mod sqlite_user_repository;
mod sqlite_voip_app_repository;

pub use sqlite_campaign_repository::SqliteCampaignRepository;
pub use sqlite_gateway_repository::SqliteGatewayRepository;
pub use sqlite_phonebook_repository::SqlitePhonebookRepository;
pub use sqlite_user_repository::SqliteUserRepository;
pub use sqlite_voip_app_repository::SqliteVoipAppRepository;
