//! CLI bootstrap - the composition root for non-serving commands.
//!
//! `serve` hands its configuration straight to `dialer_axum::start_server`;
//! every other command runs against the [`CliContext`] built here.

use std::sync::Arc;

use anyhow::Result;
use dialer_axum::ServerConfig;
use dialer_core::AppCore;
use dialer_core::ports::TelephonyPort;
use dialer_db::{CoreFactory, setup_database};
use dialer_telephony::DefaultTelephonyClient;
use tracing::debug;

/// Fully composed application context for CLI commands.
pub struct CliContext {
    pub app: Arc<AppCore>,
}

impl CliContext {
    pub const fn new(app: Arc<AppCore>) -> Self {
        Self { app }
    }

    /// Access the AppCore.
    pub fn app(&self) -> &AppCore {
        &self.app
    }
}

/// Open (creating if needed) the database and assemble the core.
pub async fn bootstrap(config: &ServerConfig) -> Result<CliContext> {
    debug!(database_path = %config.database_path.display(), "Bootstrapping CLI context");
    let pool = setup_database(&config.database_path).await?;
    let telephony: Arc<dyn TelephonyPort> =
        Arc::new(DefaultTelephonyClient::with_config(config.telephony.clone())?);
    let app = CoreFactory::build_app_core(pool, telephony);
    Ok(CliContext::new(Arc::new(app)))
}
