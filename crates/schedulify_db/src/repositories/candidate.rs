//! Repository for candidates

use crate::error::DbError;
use serde::{Deserialize, Serialize};

/// One proposed date or option of a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub schedule_id: String,
}

/// Read operations for [`Candidate`] rows
pub trait CandidateRepository {
    /// Find a candidate by id
    fn find_by_id(
        &self,
        candidate_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Candidate>, DbError>> + Send;

    /// All candidates of a schedule in creation order
    fn find_by_schedule(
        &self,
        schedule_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Candidate>, DbError>> + Send;
}
