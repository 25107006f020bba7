//! Repository for schedules
//!
//! Schedules are only ever written together with their candidates, see
//! [`crate::repositories::ScheduleAggregateRepository`]. This trait covers reads.

use crate::error::DbError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event definition owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub schedule_id: String,
    pub schedule_name: String,
    pub memo: String,
    pub created_by: i64,
    pub updated_at: DateTime<Utc>,
}

/// The fields a caller supplies when creating a schedule
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub schedule_name: String,
    pub memo: String,
    pub created_by: i64,
}

/// Read operations for [`Schedule`] rows
pub trait ScheduleRepository {
    /// Find a schedule by its id
    fn find_by_id(
        &self,
        schedule_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Schedule>, DbError>> + Send;

    /// All schedules created by a user, most recently updated first
    fn find_by_owner(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Schedule>, DbError>> + Send;
}
