//! Places outbound calls through a telephony REST service.
//!
//! One POST per call to `{base_url}/{api_version}/Call/`, form encoded and
//! authenticated with the account SID and auth token. The client implements
//! the core-owned [`TelephonyPort`](dialer_core::TelephonyPort) trait and is
//! never retried.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultTelephonyClient is used through the TelephonyPort trait, not its
// internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultTelephonyClient;

// Configuration
pub use config::TelephonyConfig;
