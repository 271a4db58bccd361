//! Serve command handler.

use anyhow::Result;
use dialer_axum::{ServerConfig, start_server};

/// Run the HTTP API until the process is stopped.
pub async fn execute(config: ServerConfig) -> Result<()> {
    println!();
    println!("  dialer API starting...");
    println!();
    println!("  Database: {}", config.database_path.display());
    println!("  API:      http://localhost:{}/api/v1/", config.port);
    println!(
        "  Throttle: {} requests / {}s per account",
        config.throttle.limit,
        config.throttle.window.as_secs()
    );
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    start_server(config).await
}
