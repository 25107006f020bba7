//! Error types for the database client

use schedulify_common::SchedulifyError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A stored value could not be turned back into a model
    #[error("Database decode error: {0}")]
    DecodeError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),
}

/// Convert DbError to SchedulifyError
impl From<DbError> for SchedulifyError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConfigError(msg) => SchedulifyError::ConfigError(msg),
            other => SchedulifyError::DatabaseError(other.to_string()),
        }
    }
}
