// --- File: crates/schedulify_common/src/lib.rs ---

pub mod error; // Error handling
pub mod html; // HTML page helpers
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, not_found, validation_error,
    HttpStatusCode, SchedulifyError,
};

// Re-export HTTP utilities for easier access
pub use http::{found, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};
