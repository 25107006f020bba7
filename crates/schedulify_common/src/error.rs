// --- File: crates/schedulify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Schedulify errors.
///
/// Each crate extends this by implementing `From<SpecificError> for SchedulifyError`.
#[derive(Error, Debug)]
pub enum SchedulifyError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SchedulifyError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulifyError::ParseError(_) => 400,
            SchedulifyError::ConfigError(_) => 500,
            SchedulifyError::AuthError(_) => 401,
            SchedulifyError::ValidationError(_) => 400,
            SchedulifyError::DatabaseError(_) => 500,
            SchedulifyError::ExternalServiceError { .. } => 502,
            SchedulifyError::NotFoundError(_) => 404,
            SchedulifyError::InternalError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for SchedulifyError {
    fn from(err: serde_json::Error) -> Self {
        SchedulifyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for SchedulifyError {
    fn from(err: std::io::Error) -> Self {
        SchedulifyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> SchedulifyError {
    SchedulifyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> SchedulifyError {
    SchedulifyError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> SchedulifyError {
    SchedulifyError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> SchedulifyError {
    SchedulifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

