// --- File: crates/schedulify_auth/src/session.rs ---
//! Cookie-backed login sessions.
//!
//! The session and the OAuth `state` value both live in private cookies:
//! encrypted and authenticated with a key derived from the configured secret.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use cookie::{Cookie, CookieJar, Key, SameSite};
use schedulify_config::AuthConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SessionError;

pub const SESSION_COOKIE_NAME: &str = "schedulify_session";
pub const OAUTH_STATE_COOKIE_NAME: &str = "schedulify_oauth_state";

/// Smallest secret accepted for key derivation.
pub const MIN_SECRET_LEN: usize = 32;

/// What the session cookie carries about the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

/// Reads and writes the private session cookies.
#[derive(Clone)]
pub struct SessionManager {
    key: Key,
    secure: bool,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Builds a manager from the auth configuration.
    ///
    /// Without a `session_secret` a random key is generated, so sessions do
    /// not survive a restart.
    pub fn new(config: &AuthConfig) -> Result<Self, SessionError> {
        match config.session_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Self::from_secret(secret.as_bytes(), config.secure_cookies),
            None => {
                warn!("No auth.session_secret configured; generating a random session key");
                Ok(Self {
                    key: Key::generate(),
                    secure: config.secure_cookies,
                })
            }
        }
    }

    pub fn from_secret(secret: &[u8], secure: bool) -> Result<Self, SessionError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(SessionError::SecretTooShort {
                min: MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }
        Ok(Self {
            key: Key::derive_from(secret),
            secure,
        })
    }

    /// Collects the request's cookies into a jar whose delta starts empty.
    pub fn jar_from_headers(headers: &HeaderMap) -> CookieJar {
        let mut jar = CookieJar::new();
        for value in headers.get_all(header::COOKIE) {
            let Ok(cookie_str) = value.to_str() else {
                continue;
            };
            for pair in cookie_str.split(';') {
                if let Ok(cookie) = Cookie::parse_encoded(pair.trim().to_string()) {
                    jar.add_original(cookie);
                }
            }
        }
        jar
    }

    /// The logged-in user, if the request carries a valid session cookie.
    pub fn current_user(&self, headers: &HeaderMap) -> Option<SessionUser> {
        let jar = Self::jar_from_headers(headers);
        let cookie = jar.private(&self.key).get(SESSION_COOKIE_NAME)?;
        match serde_json::from_str(cookie.value()) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Ignoring malformed session cookie: {}", e);
                None
            }
        }
    }

    pub fn start_session(&self, jar: &mut CookieJar, user: &SessionUser) -> Result<(), SessionError> {
        let value = serde_json::to_string(user)?;
        jar.private_mut(&self.key)
            .add(self.base_cookie(SESSION_COOKIE_NAME, value));
        Ok(())
    }

    pub fn end_session(&self, jar: &mut CookieJar) {
        jar.add(removal_cookie(SESSION_COOKIE_NAME));
    }

    pub fn store_oauth_state(&self, jar: &mut CookieJar, state: &str) {
        let mut cookie = self.base_cookie(OAUTH_STATE_COOKIE_NAME, state.to_string());
        cookie.set_max_age(cookie::time::Duration::minutes(10));
        jar.private_mut(&self.key).add(cookie);
    }

    /// Reads the stored OAuth state and schedules its removal.
    pub fn take_oauth_state(&self, jar: &mut CookieJar) -> Option<String> {
        let state = jar
            .private(&self.key)
            .get(OAUTH_STATE_COOKIE_NAME)
            .map(|c| c.value().to_string());
        jar.add(removal_cookie(OAUTH_STATE_COOKIE_NAME));
        state
    }

    /// A `Cookie` request header value that logs `user` in.
    pub fn request_cookie(&self, user: &SessionUser) -> Result<String, SessionError> {
        let mut jar = CookieJar::new();
        self.start_session(&mut jar, user)?;
        Ok(jar
            .get(SESSION_COOKIE_NAME)
            .map(|c| c.encoded().stripped().to_string())
            .unwrap_or_default())
    }

    fn base_cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, "")).path("/").build();
    cookie.make_removal();
    cookie
}

/// Appends a `Set-Cookie` header to `response` for every change in `jar`.
pub fn with_cookies(jar: &CookieJar, mut response: Response) -> Response {
    for cookie in jar.delta() {
        match HeaderValue::from_str(&cookie.encoded().to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Dropping unencodable cookie {}: {}", cookie.name(), e),
        }
    }
    response
}
