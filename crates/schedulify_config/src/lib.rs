//! Layered configuration for Schedulify.
//!
//! Sources, later ones winning:
//!
//! 1. `config/default.{toml,yaml,json}`
//! 2. `config/<RUN_ENV>.{toml,yaml,json}` (`RUN_ENV` defaults to `debug`)
//! 3. `SCHEDULIFY__SECTION__KEY` environment variables
//!
//! String values equal to `secret_from_env` are replaced with the matching
//! `SECTION_KEY` environment variable after loading.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod env_vars;
pub mod models;

pub use models::*;

use env_vars::{get_config_prefix, secret_path_to_env_var, CONFIG_SEPARATOR, SECRET_MARKER};

/// Loads the application configuration from `CONFIG_DIR` (default `config`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env)
}

/// Loads the configuration from an explicit directory and environment name.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let prefix = get_config_prefix();
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!(
        "Loading config from {} and {} (env prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator(CONFIG_SEPARATOR));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Recursively replaces all `secret_from_env` string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: &mut Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let env_key = secret_path_to_env_var(path);
                match env::var(&env_key) {
                    Ok(env_val) => *obj = Value::String(env_val),
                    Err(_) => {
                        warn!("env var {} not found for {}", env_key, SECRET_MARKER);
                        *obj = Value::String(String::new());
                    }
                }
            }
            _ => {}
        }
    }

    walk(&mut Vec::new(), value);
}

/// Applies environment overrides based on `secret_from_env` markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The path is taken from `DOTENV_OVERRIDE`, then from a first command line
/// argument starting with `.env`, then defaults to `.env`. Loading happens at
/// most once per process; the chosen path is returned.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let config = load_config_from(Path::new("does/not/exist"), "test").unwrap();
        assert_eq!(config.database.url, "sqlite://data/schedulify.db");
        assert_eq!(
            config.auth.authorize_url,
            "https://github.com/login/oauth/authorize"
        );
    }

    #[test]
    fn single_env_override_keeps_other_field_defaults() {
        env::set_var("SCHEDULIFY__SERVER__PORT", "9123");
        env::set_var("SCHEDULIFY__DATABASE__MAX_CONNECTIONS", "2");
        let config = load_config_from(Path::new("does/not/exist"), "test");
        env::remove_var("SCHEDULIFY__SERVER__PORT");
        env::remove_var("SCHEDULIFY__DATABASE__MAX_CONNECTIONS");

        let config = config.unwrap();
        assert_eq!(config.server.port, 9123);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.max_connections, Some(2));
        assert_eq!(config.database.url, "sqlite://data/schedulify.db");
    }

    #[test]
    fn secret_marker_is_replaced_from_environment() {
        env::set_var("AUTH_SESSION_SECRET", "a-session-secret-that-is-long-enough-123");
        let mut config = AppConfig::default();
        config.auth.session_secret = Some(SECRET_MARKER.to_string());

        let config = apply_env_overrides_from_marker(config).unwrap();
        assert_eq!(
            config.auth.session_secret.as_deref(),
            Some("a-session-secret-that-is-long-enough-123")
        );
    }
}
