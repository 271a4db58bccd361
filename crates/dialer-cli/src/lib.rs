//! `dialer` command-line interface.
//!
//! Runs the HTTP API (`dialer serve`) and covers the administrative tasks
//! the API deliberately leaves out: creating accounts, setting dialer
//! limits, registering gateways and VoIP applications, and placing a one-off
//! test call.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary target only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::{Commands, GatewayCommand, UserCommand, VoipAppCommand};
pub use error::CliError;
pub use parser::Cli;
