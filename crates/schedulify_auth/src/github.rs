// --- File: crates/schedulify_auth/src/github.rs ---
//! GitHub OAuth web flow: authorize redirect, code exchange and user lookup.

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use schedulify_config::AuthConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::AuthError;

pub const OAUTH_SCOPE: &str = "user:email";

#[derive(Serialize)]
struct AuthorizeParams<'a> {
    client_id: &'a str,
    redirect_uri: &'a str,
    scope: &'a str,
    state: &'a str,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

// GitHub answers 200 even for a bad code, with `error` set instead of a token.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// The fields of `GET /user` we keep.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GithubUser {
    pub id: i64,
    pub login: String,
}

/// Talks to GitHub's OAuth and REST endpoints.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    config: AuthConfig,
}

impl GithubClient {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// The URL the browser is sent to, carrying `state` for CSRF protection.
    pub fn authorize_url(&self, state: &str) -> Result<String, AuthError> {
        if self.config.github_client_id.is_empty() {
            return Err(AuthError::NotConfigured(
                "auth.github_client_id is empty".to_string(),
            ));
        }
        let query = serde_urlencoded::to_string(AuthorizeParams {
            client_id: &self.config.github_client_id,
            redirect_uri: &self.config.callback_url,
            scope: OAUTH_SCOPE,
            state,
        })
        .map_err(|e| AuthError::NotConfigured(e.to_string()))?;
        Ok(format!("{}?{}", self.config.authorize_url, query))
    }

    /// Exchanges an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        debug!("Exchanging OAuth code at {}", self.config.token_url);

        let response = self
            .http
            .post(&self.config.token_url)
            .header(ACCEPT, "application/json")
            .form(&TokenRequest {
                client_id: &self.config.github_client_id,
                client_secret: &self.config.github_client_secret,
                code,
                redirect_uri: &self.config.callback_url,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("GitHub token endpoint returned {}: {}", status, body);
            return Err(AuthError::TokenExchange(format!("status {}", status)));
        }

        let token: TokenResponse = response.json().await?;
        match token {
            TokenResponse {
                access_token: Some(access_token),
                ..
            } => Ok(access_token),
            TokenResponse {
                error,
                error_description,
                ..
            } => {
                let message = error_description
                    .or(error)
                    .unwrap_or_else(|| "no access_token in response".to_string());
                error!("GitHub token exchange rejected: {}", message);
                Err(AuthError::TokenExchange(message))
            }
        }
    }

    /// Fetches the account the access token belongs to.
    pub async fn fetch_user(&self, access_token: &str) -> Result<GithubUser, AuthError> {
        let url = format!("{}/user", self.config.api_url.trim_end_matches('/'));
        debug!("Fetching GitHub user from {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, "schedulify")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("GitHub user endpoint returned {}", status);
            return Err(AuthError::UserLookup(format!("status {}", status)));
        }

        let user: GithubUser = response.json().await?;
        info!("GitHub user {} ({}) authenticated", user.login, user.id);
        Ok(user)
    }
}
