//! Repository for users
//!
//! Users are keyed by the numeric id handed out by the OAuth provider, so the
//! only write is an idempotent upsert.

use crate::error::DbError;
use serde::{Deserialize, Serialize};

/// A person who can own schedules and answer availabilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
}

impl User {
    pub fn new(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

/// Storage operations for [`User`] rows
pub trait UserRepository {
    /// Insert the user, or update the username if the id already exists
    fn upsert(&self, user: User) -> impl std::future::Future<Output = Result<User, DbError>> + Send;

    /// Find a user by id
    fn find_by_id(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;

    /// Users that have answered at least one candidate of a schedule, ordered by id
    fn find_by_schedule(
        &self,
        schedule_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<User>, DbError>> + Send;
}
