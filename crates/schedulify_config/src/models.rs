// --- File: crates/schedulify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String, // e.g. loaded via SCHEDULIFY__DATABASE__URL
    pub max_connections: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/schedulify.db".to_string(),
            max_connections: None,
        }
    }
}

// --- Authentication Config ---
// GitHub OAuth app settings plus the key material for the session cookie.
// The endpoint URLs are configurable so tests can point them at a mock server.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub github_client_id: String,
    #[serde(default)]
    pub github_client_secret: String, // usually "secret_from_env" -> AUTH_GITHUB_CLIENT_SECRET
    #[serde(default = "default_callback_url")]
    pub callback_url: String,
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    // At least 32 bytes; a random key is generated when absent.
    #[serde(default)]
    pub session_secret: Option<String>,
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_callback_url() -> String {
    "http://localhost:8000/auth/github/callback".to_string()
}

fn default_authorize_url() -> String {
    "https://github.com/login/oauth/authorize".to_string()
}

fn default_token_url() -> String {
    "https://github.com/login/oauth/access_token".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            github_client_id: String::new(),
            github_client_secret: String::new(),
            callback_url: default_callback_url(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            api_url: default_api_url(),
            session_secret: None,
            secure_cookies: false,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}
