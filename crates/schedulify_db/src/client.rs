//! Database client for Schedulify
//!
//! This module provides a database client that is designed to be database agnostic,
//! using SQLx's `Any` driver as the underlying database library.

use crate::error::DbError;
use schedulify_config::DatabaseConfig;
use sqlx::any::AnyConnectOptions;
use sqlx::pool::PoolOptions;
use sqlx::{Any, Pool, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Type alias for a database transaction
pub type DbTransaction<'a> = Transaction<'a, Any>;

/// Pool size used when the configuration does not set one
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database client for Schedulify
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<Any>,
}

impl DbClient {
    /// Create a new database client from a database configuration
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL is empty
    /// * The database connection fails
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        if db_config.url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        let max_connections = db_config
            .max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let pool = Self::create_pool(&db_config.url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Create a new database client from a database URL with the default pool size
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or invalid, or the connection fails.
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url, DEFAULT_MAX_CONNECTIONS).await?;
        Ok(Self { pool })
    }

    /// Create a connection pool
    ///
    /// SQLite connections get `PRAGMA foreign_keys = ON`. In-memory SQLite
    /// databases live and die with their connection, so they are pinned to a
    /// single connection that is never recycled.
    async fn create_pool(db_url: &str, max_connections: u32) -> Result<Pool<Any>, DbError> {
        debug!("Creating database pool with URL: {}", db_url);

        sqlx::any::install_default_drivers();

        let in_memory = is_in_memory(db_url);
        let mut pool_options = PoolOptions::<Any>::new()
            .acquire_timeout(Duration::from_secs(3))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    if conn.backend_name() == "SQLite" {
                        sqlx::query("PRAGMA foreign_keys = ON")
                            .execute(&mut *conn)
                            .await?;
                    }
                    Ok(())
                })
            });

        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .max_connections(max_connections)
                .idle_timeout(Duration::from_secs(600))
        };

        if db_url.starts_with("sqlite:") && !in_memory {
            ensure_sqlite_file(db_url)?;
        }

        let pool = pool_options
            .connect_with(AnyConnectOptions::from_str(db_url)?)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::PoolError(e.to_string())
            })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<Any> {
        &self.pool
    }

    /// Begin a transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub async fn begin(&self) -> Result<DbTransaction<'static>, DbError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))
    }

    /// Execute a statement that returns no rows, yielding the number of rows affected
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails to execute.
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    /// Check if the database is healthy by executing a trivial query
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient")
    }
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

/// Creates the parent directory and an empty file for a file-backed SQLite URL.
///
/// Handles both `sqlite:example.db` and `sqlite://example.db`; query
/// parameters such as `?mode=rwc` are ignored.
fn ensure_sqlite_file(db_url: &str) -> Result<(), DbError> {
    let db_path = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
        .unwrap_or(db_url);
    let db_path = db_path.split('?').next().unwrap_or(db_path);
    if db_path.is_empty() {
        return Ok(());
    }

    let path = Path::new(db_path);
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            debug!("Creating directory for SQLite database: {:?}", dir);
            std::fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create directory for SQLite database: {}", e);
                DbError::PoolError(format!("Failed to create directory: {}", e))
            })?;
        }
    }

    if !path.exists() {
        debug!("Creating empty SQLite database file: {}", db_path);
        std::fs::File::create(path).map_err(|e| {
            error!("Failed to create SQLite database file: {}", e);
            DbError::PoolError(format!("Failed to create database file: {}", e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:test?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://data/schedulify.db"));
    }

    #[tokio::test]
    async fn empty_url_is_a_config_error() {
        let err = DbClient::from_url("").await.unwrap_err();
        assert!(matches!(err, DbError::ConfigError(_)));
    }

    #[tokio::test]
    async fn in_memory_client_is_healthy() {
        let client = DbClient::from_url("sqlite::memory:").await.unwrap();
        assert!(client.is_healthy().await);
    }
}
