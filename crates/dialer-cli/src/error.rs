//! CLI-specific error types and mappings.
//!
//! Maps [`CoreError`] to exit codes and user-facing messages.

use dialer_core::{AuthError, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Rejected input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    /// The telephony service refused or failed the call.
    #[error("Telephony error: {0}")]
    Telephony(String),
}

impl CliError {
    /// Map error to an exit code following sysexits.h.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 64,   // EX_USAGE
            Self::NotFound(_) => 66,    // EX_NOINPUT
            Self::Telephony(_) => 69,   // EX_UNAVAILABLE
            Self::Database(_) => 73,    // EX_CANTCREAT
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::InvalidFields(errors) => Self::Arguments(errors.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::NotFound(what) => Self::NotFound(what),
            CoreError::PermissionDenied(msg) => Self::Core(msg),
            CoreError::Telephony(e) => Self::Telephony(e.to_string()),
            CoreError::Auth(AuthError::Repository(repo_err)) => {
                Self::Database(repo_err.to_string())
            }
            CoreError::Auth(e) => Self::Core(e.to_string()),
            CoreError::Configuration(msg) => Self::Config(msg),
            CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}
