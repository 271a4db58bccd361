//! Axum web server adapter for the dialer campaign API.
//!
//! Serves the campaign, phonebook, gateway, VoIP application and user
//! resources under `/api/v1/`, authenticated with HTTP Basic against the
//! local user store and throttled per credential. Handlers are thin: they
//! decode the request, call into [`dialer_core::AppCore`] and shape the
//! result into the list/detail envelopes clients expect.
//!
//! # Example
//!
//! ```ignore
//! use dialer_axum::{ServerConfig, start_server};
//!
//! let config = ServerConfig::new("/var/lib/dialer/dialer.db").with_port(8000);
//! start_server(config).await?;
//! ```

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the integration tests under tests/
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod auth;
pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod throttle;

// Re-export primary types
pub use auth::Caller;
pub use bootstrap::{AxumContext, DEFAULT_PORT, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use routes::create_router;
pub use state::AppState;
pub use throttle::{Throttle, ThrottleConfig};
