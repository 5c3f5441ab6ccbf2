//! SQLite pool construction

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;
use werkstatt_config::DatabaseConfig;
use werkstatt_errors::{AppError, AppResult};

use super::migrations::MigrationManager;

/// Open the database the application works on: connect, then bring the
/// schema up to date.
pub async fn open(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let pool = connect(config).await?;

    let applied = MigrationManager::new(pool.clone()).run().await?;
    if applied > 0 {
        info!(applied, "Schema migrations applied");
    }

    Ok(pool)
}

/// Build the connection pool without touching the schema.
pub async fn connect(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    if config.path == ":memory:" {
        return connect_in_memory().await;
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        // Referential rules live in the handlers; historical records may keep
        // pointing at customers or parts that no longer exist.
        .foreign_keys(false)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database {}: {}", config.path, e)))?;

    Ok(pool)
}

/// SQLite drops an in-memory database together with its last connection,
/// so the pool is pinned to a single connection that is never recycled.
async fn connect_in_memory() -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::new().in_memory(true).foreign_keys(false);

    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("Failed to open in-memory database: {}", e)))?;

    Ok(pool)
}

/// Ephemeral database, fully migrated.
pub async fn in_memory() -> AppResult<SqlitePool> {
    let pool = connect_in_memory().await?;

    MigrationManager::new(pool.clone()).run().await?;

    Ok(pool)
}
