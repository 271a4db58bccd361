//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` database with full schema. Entry points call this with the
//! resolved database path.

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;
use tracing::debug;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// Creates the parent directory and the database file when missing, turns
/// on foreign key enforcement and creates every table and index.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or created, or
/// if schema creation fails.
///
/// # Example
///
/// ```rust,no_run
/// use dialer_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/var/lib/dialer/dialer.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;
    debug!(path = %db_path.display(), "Database ready");

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Creates a fresh in-memory database with the full production schema. The
/// pool holds a single connection that never expires, since the database
/// lives only as long as that connection.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    use sqlx::sqlite::SqlitePoolOptions;
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// It is safe to call multiple times as all operations use IF NOT EXISTS.
/// Date-times are stored as `YYYY-MM-DD HH:MM:SS` text in UTC, times of day
/// as `HH:MM:SS`.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            password_hash TEXT NOT NULL,
            is_superuser INTEGER NOT NULL DEFAULT 0,
            last_login TEXT,
            date_joined TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One row per configured user; absence means "not configured"
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dialer_settings (
            user_id INTEGER PRIMARY KEY NOT NULL,
            max_number_campaign INTEGER NOT NULL,
            max_frequency INTEGER NOT NULL,
            callmaxduration INTEGER NOT NULL,
            maxretry INTEGER NOT NULL,
            max_calltimeout INTEGER NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS gateways (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            gateways TEXT NOT NULL,
            gateway_codecs TEXT NOT NULL,
            gateway_timeouts TEXT NOT NULL,
            gateway_retries TEXT NOT NULL,
            maximum_call INTEGER,
            status INTEGER NOT NULL DEFAULT 1 CHECK (status IN (0, 1)),
            created_date TEXT NOT NULL,
            updated_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS voip_apps (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            app_type INTEGER NOT NULL CHECK (app_type BETWEEN 1 AND 4),
            data TEXT NOT NULL DEFAULT '',
            created_date TEXT NOT NULL,
            updated_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campaigns (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            campaign_code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            callerid TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1 CHECK (status BETWEEN 1 AND 4),
            startingdate TEXT NOT NULL,
            expirationdate TEXT NOT NULL,
            daily_start_time TEXT NOT NULL,
            daily_stop_time TEXT NOT NULL,
            monday INTEGER NOT NULL DEFAULT 1,
            tuesday INTEGER NOT NULL DEFAULT 1,
            wednesday INTEGER NOT NULL DEFAULT 1,
            thursday INTEGER NOT NULL DEFAULT 1,
            friday INTEGER NOT NULL DEFAULT 1,
            saturday INTEGER NOT NULL DEFAULT 1,
            sunday INTEGER NOT NULL DEFAULT 1,
            frequency INTEGER NOT NULL,
            callmaxduration INTEGER NOT NULL,
            maxretry INTEGER NOT NULL,
            intervalretry INTEGER NOT NULL,
            calltimeout INTEGER NOT NULL,
            aleg_gateway_id INTEGER,
            voipapp_id INTEGER,
            extra_data TEXT NOT NULL DEFAULT '',
            user_id INTEGER NOT NULL,
            created_date TEXT NOT NULL,
            updated_date TEXT NOT NULL,
            UNIQUE (user_id, name),
            FOREIGN KEY (aleg_gateway_id) REFERENCES gateways(id) ON DELETE SET NULL,
            FOREIGN KEY (voipapp_id) REFERENCES voip_apps(id) ON DELETE SET NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_campaigns_user ON campaigns(user_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS phonebooks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            campaign_id INTEGER,
            user_id INTEGER NOT NULL,
            created_date TEXT NOT NULL,
            updated_date TEXT NOT NULL,
            FOREIGN KEY (campaign_id) REFERENCES campaigns(id) ON DELETE SET NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_phonebooks_user ON phonebooks(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}
