//! Repository for availabilities

use crate::error::DbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A user's answer for one candidate
///
/// Stored and sent over the wire as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum AvailabilityCode {
    /// No row stored yet counts as absent
    #[default]
    Absent,
    Unknown,
    Present,
}

/// Returned for integer codes outside 0..=2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid availability code: {0}")]
pub struct InvalidAvailabilityCode(pub i64);

impl AvailabilityCode {
    pub const ALL: [AvailabilityCode; 3] = [
        AvailabilityCode::Absent,
        AvailabilityCode::Unknown,
        AvailabilityCode::Present,
    ];

    pub fn code(self) -> i64 {
        match self {
            AvailabilityCode::Absent => 0,
            AvailabilityCode::Unknown => 1,
            AvailabilityCode::Present => 2,
        }
    }

    /// Short label used on the schedule page
    pub fn label(self) -> &'static str {
        match self {
            AvailabilityCode::Absent => "欠",
            AvailabilityCode::Unknown => "?",
            AvailabilityCode::Present => "出",
        }
    }

    /// The code a toggle button moves to next
    pub fn next(self) -> Self {
        match self {
            AvailabilityCode::Absent => AvailabilityCode::Unknown,
            AvailabilityCode::Unknown => AvailabilityCode::Present,
            AvailabilityCode::Present => AvailabilityCode::Absent,
        }
    }
}

impl From<AvailabilityCode> for i64 {
    fn from(code: AvailabilityCode) -> Self {
        code.code()
    }
}

impl TryFrom<i64> for AvailabilityCode {
    type Error = InvalidAvailabilityCode;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AvailabilityCode::Absent),
            1 => Ok(AvailabilityCode::Unknown),
            2 => Ok(AvailabilityCode::Present),
            other => Err(InvalidAvailabilityCode(other)),
        }
    }
}

impl fmt::Display for AvailabilityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One user's answer for one candidate of a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub candidate_id: i64,
    pub user_id: i64,
    pub availability: AvailabilityCode,
    pub schedule_id: String,
}

/// Storage operations for [`Availability`] rows
pub trait AvailabilityRepository {
    /// Insert the answer, or replace the code of the existing (candidate, user) row
    fn upsert(
        &self,
        availability: Availability,
    ) -> impl std::future::Future<Output = Result<Availability, DbError>> + Send;

    /// All answers recorded for a schedule
    fn find_by_schedule(
        &self,
        schedule_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Availability>, DbError>> + Send;
}
