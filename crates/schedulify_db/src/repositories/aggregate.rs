//! Schedule aggregate: a schedule together with its candidates
//!
//! Writes that touch more than one table live here and run in a single
//! transaction.

use crate::error::DbError;
use crate::repositories::candidate::Candidate;
use crate::repositories::schedule::{NewSchedule, Schedule};
use serde::{Deserialize, Serialize};

/// A schedule and its candidates, ordered by candidate id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleAggregate {
    pub schedule: Schedule,
    pub candidates: Vec<Candidate>,
}

/// Multi-table writes for the schedule aggregate
pub trait ScheduleAggregateRepository {
    /// Insert the schedule and one candidate per name
    ///
    /// Either every row is written or none is.
    fn create_schedule_aggregate(
        &self,
        new_schedule: NewSchedule,
        candidate_names: Vec<String>,
    ) -> impl std::future::Future<Output = Result<ScheduleAggregate, DbError>> + Send;

    /// Delete availabilities, then candidates, then the schedule itself
    ///
    /// Returns whether a schedule row was removed. An unknown id is not an
    /// error. The first failing statement aborts the whole deletion and its
    /// error is returned unchanged.
    fn delete_schedule_aggregate(
        &self,
        schedule_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
