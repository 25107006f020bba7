use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Response;
use schedulify_common::found;
use std::convert::Infallible;
use tracing::debug;

use crate::session::{SessionManager, SessionUser};

/// Where unauthenticated requests to protected routes are sent.
pub const LOGIN_PATH: &str = "/login";

/// The logged-in user. Rejects with `302 Found` to [`LOGIN_PATH`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    SessionManager: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionManager::from_ref(state);
        match sessions.current_user(&parts.headers) {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                debug!("No session for {}, redirecting to login", parts.uri.path());
                Err(found(LOGIN_PATH))
            }
        }
    }
}

/// The logged-in user, if any.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    SessionManager: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionManager::from_ref(state);
        Ok(MaybeUser(sessions.current_user(&parts.headers)))
    }
}
