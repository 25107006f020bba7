//! Repositories for the Schedulify tables
//!
//! Each entity has a trait describing its operations and a `Sql*` type
//! implementing it on top of [`DbClient`].

pub mod aggregate;
pub mod aggregate_sql;
pub mod availability;
pub mod availability_sql;
pub mod candidate;
pub mod candidate_sql;
pub mod schedule;
pub mod schedule_sql;
pub mod user;
pub mod user_sql;

pub use aggregate::{ScheduleAggregate, ScheduleAggregateRepository};
pub use aggregate_sql::SqlScheduleAggregateRepository;
pub use availability::{
    Availability, AvailabilityCode, AvailabilityRepository, InvalidAvailabilityCode,
};
pub use availability_sql::SqlAvailabilityRepository;
pub use candidate::{Candidate, CandidateRepository};
pub use candidate_sql::SqlCandidateRepository;
pub use schedule::{NewSchedule, Schedule, ScheduleRepository};
pub use schedule_sql::SqlScheduleRepository;
pub use user::{User, UserRepository};
pub use user_sql::SqlUserRepository;

use crate::DbClient;

/// Every SQL repository, sharing one pool
#[derive(Debug, Clone)]
pub struct Repositories {
    pub users: SqlUserRepository,
    pub schedules: SqlScheduleRepository,
    pub candidates: SqlCandidateRepository,
    pub availabilities: SqlAvailabilityRepository,
    pub aggregates: SqlScheduleAggregateRepository,
}

impl Repositories {
    pub fn new(db_client: DbClient) -> Self {
        Self {
            users: SqlUserRepository::new(db_client.clone()),
            schedules: SqlScheduleRepository::new(db_client.clone()),
            candidates: SqlCandidateRepository::new(db_client.clone()),
            availabilities: SqlAvailabilityRepository::new(db_client.clone()),
            aggregates: SqlScheduleAggregateRepository::new(db_client),
        }
    }
}
