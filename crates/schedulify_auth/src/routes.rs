// --- File: crates/schedulify_auth/src/routes.rs ---
use axum::{routing::get, Router};
use schedulify_config::AuthConfig;
use schedulify_db::{DbClient, SqlUserRepository};

use crate::github::GithubClient;
use crate::handlers::{github_callback, github_start, login_page, logout, AuthState};
use crate::session::SessionManager;

impl AuthState {
    pub fn new(config: &AuthConfig, sessions: SessionManager, db_client: DbClient) -> Self {
        Self {
            sessions,
            github: GithubClient::new(config.clone()),
            users: SqlUserRepository::new(db_client),
        }
    }
}

/// Login, logout and the GitHub OAuth endpoints.
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/login", get(login_page))
        .route("/logout", get(logout))
        .route("/auth/github", get(github_start))
        .route("/auth/github/callback", get(github_callback))
        .with_state(state)
}
