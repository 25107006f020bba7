use schedulify_common::{external_service_error, SchedulifyError};
use schedulify_db::DbError;
use thiserror::Error;

/// Problems with the session cookie key material
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session secret must be at least {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised during the GitHub login flow
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("OAuth state cookie missing or unreadable")]
    MissingState,

    #[error("OAuth state mismatch")]
    StateMismatch,

    #[error("GitHub login is not configured: {0}")]
    NotConfigured(String),

    #[error("GitHub token exchange failed: {0}")]
    TokenExchange(String),

    #[error("GitHub user lookup failed: {0}")]
    UserLookup(String),

    #[error("HTTP request to GitHub failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<SessionError> for SchedulifyError {
    fn from(err: SessionError) -> Self {
        SchedulifyError::ConfigError(err.to_string())
    }
}

impl From<AuthError> for SchedulifyError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingState | AuthError::StateMismatch => {
                SchedulifyError::AuthError(err.to_string())
            }
            AuthError::NotConfigured(msg) => SchedulifyError::ConfigError(msg),
            AuthError::TokenExchange(msg) | AuthError::UserLookup(msg) => {
                external_service_error("github", msg)
            }
            AuthError::Http(e) => external_service_error("github", e),
            AuthError::Session(e) => e.into(),
            AuthError::Database(e) => e.into(),
        }
    }
}
