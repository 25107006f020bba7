// --- File: crates/schedulify_auth/src/lib.rs ---
//! GitHub login and cookie sessions.
//!
//! Other crates protect their routes with the [`CurrentUser`] extractor; it
//! only needs `SessionManager: FromRef<State>`.

pub mod error;
pub mod extract;
pub mod github;
pub mod handlers;
pub mod routes;
pub mod session;

pub use error::{AuthError, SessionError};
pub use extract::{CurrentUser, MaybeUser, LOGIN_PATH};
pub use github::{GithubClient, GithubUser};
pub use handlers::AuthState;
pub use routes::routes;
pub use session::{with_cookies, SessionManager, SessionUser, SESSION_COOKIE_NAME};
