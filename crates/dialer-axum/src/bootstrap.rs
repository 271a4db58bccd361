//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the HTTP adapter. All concrete implementations are instantiated here.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use dialer_core::AppCore;
use dialer_core::ports::TelephonyPort;
use dialer_db::{CoreFactory, setup_database};
use dialer_telephony::{DefaultTelephonyClient, TelephonyConfig};
use tracing::info;

use crate::throttle::{Throttle, ThrottleConfig};

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 8000;

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// `SQLite` database file; created on first start.
    pub database_path: PathBuf,
    /// Telephony REST service used by the dial endpoint.
    pub telephony: TelephonyConfig,
    pub throttle: ThrottleConfig,
}

impl ServerConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: database_path.into(),
            telephony: TelephonyConfig::default(),
            throttle: ThrottleConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_telephony(mut self, telephony: TelephonyConfig) -> Self {
        self.telephony = telephony;
        self
    }

    #[must_use]
    pub const fn with_throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = throttle;
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
    /// Per-credential request counter.
    pub throttle: Throttle,
}

impl AxumContext {
    pub fn new(core: Arc<AppCore>, throttle: ThrottleConfig) -> Self {
        Self {
            core,
            throttle: Throttle::new(throttle),
        }
    }
}

/// Open the database and assemble the core with the REST telephony client.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    info!(
        database_path = %config.database_path.display(),
        throttle_limit = config.throttle.limit,
        throttle_window_secs = config.throttle.window.as_secs(),
        "Bootstrapping dialer API"
    );

    let pool = setup_database(&config.database_path).await?;
    let telephony: Arc<dyn TelephonyPort> =
        Arc::new(DefaultTelephonyClient::with_config(config.telephony.clone())?);
    let core = Arc::new(CoreFactory::build_app_core(pool, telephony));

    Ok(AxumContext::new(core, config.throttle))
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("dialer API listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
