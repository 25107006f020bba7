//! Environment variable naming for the Schedulify configuration.
//!
//! Configuration values are overridden with `SCHEDULIFY__SECTION__KEY`
//! variables; secrets marked `secret_from_env` in a config file are read from
//! `SECTION_KEY` variables.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "SCHEDULIFY";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that asks the loader to pull a secret from the environment
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path to an environment variable name
///
/// `["auth", "github_client_secret"]` becomes `"AUTH_GITHUB_CLIENT_SECRET"`.
pub fn secret_path_to_env_var(path: &[String]) -> String {
    path.join(SECRET_SEPARATOR).to_uppercase()
}
