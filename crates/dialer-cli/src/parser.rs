//! Main CLI parser and global options.
//!
//! Every global option can also come from a `DIALER_*` environment
//! variable, which `main` lets `.env` populate.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use dialer_axum::{DEFAULT_PORT, ServerConfig, ThrottleConfig};
use dialer_telephony::TelephonyConfig;

use crate::commands::Commands;

/// Outbound dialer campaign API.
#[derive(Parser)]
#[command(name = "dialer")]
#[command(about = "Manage and serve the dialer campaign API")]
#[command(version)]
pub struct Cli {
    /// `SQLite` database file
    #[arg(long, global = true, env = "DIALER_DATABASE", default_value = "dialer.db")]
    pub database: PathBuf,

    /// HTTP port for `serve`
    #[arg(long, global = true, env = "DIALER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Telephony REST service root URL
    #[arg(long, global = true, env = "DIALER_TELEPHONY_URL")]
    pub telephony_url: Option<String>,

    /// Telephony REST API version segment
    #[arg(long, global = true, env = "DIALER_TELEPHONY_API_VERSION")]
    pub telephony_api_version: Option<String>,

    /// Telephony account SID
    #[arg(long, global = true, env = "DIALER_TELEPHONY_SID", default_value = "")]
    pub telephony_sid: String,

    /// Telephony auth token
    #[arg(
        long,
        global = true,
        env = "DIALER_TELEPHONY_TOKEN",
        default_value = "",
        hide_env_values = true
    )]
    pub telephony_token: String,

    /// Answer URL sent with every call
    #[arg(long, global = true, env = "DIALER_ANSWER_URL")]
    pub answer_url: Option<String>,

    /// Hangup URL sent with every call
    #[arg(long, global = true, env = "DIALER_HANGUP_URL")]
    pub hangup_url: Option<String>,

    /// Requests allowed per credential per window
    #[arg(long, global = true, env = "DIALER_THROTTLE_LIMIT")]
    pub throttle_limit: Option<u32>,

    /// Throttle window length in seconds
    #[arg(long, global = true, env = "DIALER_THROTTLE_WINDOW_SECS")]
    pub throttle_window_secs: Option<u64>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn telephony_config(&self) -> TelephonyConfig {
        let mut config = TelephonyConfig::new()
            .with_credentials(&self.telephony_sid, &self.telephony_token)
            .with_answer_url(self.answer_url.clone())
            .with_hangup_url(self.hangup_url.clone());
        if let Some(url) = &self.telephony_url {
            config = config.with_base_url(url);
        }
        if let Some(version) = &self.telephony_api_version {
            config = config.with_api_version(version);
        }
        config
    }

    pub fn throttle_config(&self) -> ThrottleConfig {
        let mut throttle = ThrottleConfig::default();
        if let Some(limit) = self.throttle_limit {
            throttle = throttle.with_limit(limit);
        }
        if let Some(secs) = self.throttle_window_secs {
            throttle = throttle.with_window(Duration::from_secs(secs));
        }
        throttle
    }

    /// Server configuration assembled from the global options.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(&self.database)
            .with_port(self.port)
            .with_telephony(self.telephony_config())
            .with_throttle(self.throttle_config())
    }

    /// `RUST_LOG`-style directive used when `RUST_LOG` is unset.
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "dialer",
            "--database",
            "/tmp/campaigns.db",
            "--port",
            "9100",
            "--throttle-limit",
            "50",
            "--throttle-window-secs",
            "60",
            "serve",
        ]);

        let config = cli.server_config();
        assert_eq!(config.port, 9100);
        assert_eq!(config.database_path, PathBuf::from("/tmp/campaigns.db"));
        assert_eq!(config.throttle.limit, 50);
        assert_eq!(config.throttle.window, Duration::from_secs(60));
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_throttle_defaults_when_unset() {
        let cli = Cli::parse_from(["dialer", "serve"]);
        assert_eq!(cli.throttle_config(), ThrottleConfig::default());
        assert_eq!(cli.default_log_filter(), "info");
    }

    #[test]
    fn test_verbose_switches_filter() {
        let cli = Cli::parse_from(["dialer", "-v", "serve"]);
        assert_eq!(cli.default_log_filter(), "debug");
    }
}
