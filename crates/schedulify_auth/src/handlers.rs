// --- File: crates/schedulify_auth/src/handlers.rs ---
use axum::{
    extract::{FromRef, Query, State},
    http::HeaderMap,
    response::{Html, Response},
};
use schedulify_common::{found, html, SchedulifyError};
use schedulify_db::{SqlUserRepository, User, UserRepository};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AuthError;
use crate::extract::MaybeUser;
use crate::github::GithubClient;
use crate::session::{with_cookies, SessionManager, SessionUser};

/// Shared state for the login routes.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: SessionManager,
    pub github: GithubClient,
    pub users: SqlUserRepository,
}

impl FromRef<AuthState> for SessionManager {
    fn from_ref(state: &AuthState) -> Self {
        state.sessions.clone()
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Login page; shows the current user when already logged in.
#[axum::debug_handler(state = AuthState)]
pub async fn login_page(MaybeUser(user): MaybeUser) -> Html<String> {
    let status = match &user {
        Some(user) => format!(
            "<p>ログイン中: <span class=\"username\">{}</span> (<a href=\"/logout\">ログアウト</a>)</p>",
            html::escape(&user.username)
        ),
        None => String::new(),
    };
    html::page(
        "ログイン",
        &format!(
            "<h1>ログイン</h1>\n{}<p><a href=\"/auth/github\">GitHub でログイン</a></p>",
            status
        ),
    )
}

/// Clears the session and returns to the top page.
#[axum::debug_handler]
pub async fn logout(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    let mut jar = SessionManager::jar_from_headers(&headers);
    state.sessions.end_session(&mut jar);
    with_cookies(&jar, found("/"))
}

/// Starts the GitHub OAuth flow.
#[axum::debug_handler]
pub async fn github_start(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<Response, SchedulifyError> {
    let oauth_state = Uuid::new_v4().to_string();
    let authorize_url = state.github.authorize_url(&oauth_state)?;

    let mut jar = SessionManager::jar_from_headers(&headers);
    state.sessions.store_oauth_state(&mut jar, &oauth_state);
    Ok(with_cookies(&jar, found(&authorize_url)))
}

/// Completes the GitHub OAuth flow and logs the user in.
#[axum::debug_handler]
pub async fn github_callback(
    State(state): State<AuthState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, SchedulifyError> {
    let mut jar = SessionManager::jar_from_headers(&headers);
    let stored_state = state.sessions.take_oauth_state(&mut jar);

    if let Some(error) = &query.error {
        warn!("GitHub reported an OAuth error: {}", error);
        return Ok(with_cookies(&jar, found("/login")));
    }

    let stored_state = stored_state.ok_or(AuthError::MissingState)?;
    if query.state.as_deref() != Some(stored_state.as_str()) {
        warn!("OAuth state mismatch on callback");
        return Err(AuthError::StateMismatch.into());
    }
    let code = query
        .code
        .as_deref()
        .ok_or_else(|| SchedulifyError::ValidationError("missing code".to_string()))?;

    let access_token = state.github.exchange_code(code).await?;
    let github_user = state.github.fetch_user(&access_token).await?;

    let user = state
        .users
        .upsert(User::new(github_user.id, github_user.login))
        .await
        .map_err(AuthError::from)?;

    state.sessions.start_session(
        &mut jar,
        &SessionUser {
            id: user.user_id,
            username: user.username.clone(),
        },
    )?;
    info!("User {} logged in", user.username);

    Ok(with_cookies(&jar, found("/")))
}
