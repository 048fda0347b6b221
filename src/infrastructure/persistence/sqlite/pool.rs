use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::domain::auth::errors::RepositoryError;
use crate::infrastructure::config::DatabaseConfig;

/// Opens the SQLite pool described by `config` and brings the schema up to date
///
/// The database file and its parent directory are created if missing. Writers
/// wait on a locked database for up to `connect_timeout_seconds` instead of
/// failing immediately.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, RepositoryError> {
  let busy_timeout = Duration::from_secs(config.connect_timeout_seconds);

  let connect_options = SqliteConnectOptions::from_str(&config.url)
    .map_err(|e| RepositoryError::ConnectionFailed(format!("Invalid SQLite URL: {}", e)))?
    .create_if_missing(true)
    .busy_timeout(busy_timeout)
    .journal_mode(SqliteJournalMode::Wal);

  // In-memory databases have no parent directory
  if let Some(parent) = connect_options
    .get_filename()
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
  {
    std::fs::create_dir_all(parent).map_err(|e| {
      RepositoryError::ConnectionFailed(format!(
        "Failed to create database directory {}: {}",
        parent.display(),
        e
      ))
    })?;
  }

  let pool = SqlitePoolOptions::new()
    .max_connections(config.max_connections.max(1))
    .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
    .connect_with(connect_options)
    .await
    .map_err(|e| {
      tracing::error!(error = %e, url = %config.url, "Failed to create SQLite database pool");
      RepositoryError::from(e)
    })?;

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .map_err(|e| RepositoryError::QueryFailed(format!("Migration failed: {}", e)))?;

  tracing::info!(
    url = %config.url,
    max_connections = config.max_connections,
    "SQLite database pool ready"
  );

  Ok(pool)
}
