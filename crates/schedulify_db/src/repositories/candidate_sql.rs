//! SQL implementation of the candidate repository

use crate::error::DbError;
use crate::repositories::candidate::{Candidate, CandidateRepository};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the candidate repository
#[derive(Debug, Clone)]
pub struct SqlCandidateRepository {
    db_client: DbClient,
}

impl SqlCandidateRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

pub(crate) fn candidate_from_row(row: &AnyRow) -> Result<Candidate, DbError> {
    Ok(Candidate {
        candidate_id: row.try_get("candidate_id")?,
        candidate_name: row.try_get("candidate_name")?,
        schedule_id: row.try_get("schedule_id")?,
    })
}

impl CandidateRepository for SqlCandidateRepository {
    async fn find_by_id(&self, candidate_id: i64) -> Result<Option<Candidate>, DbError> {
        debug!("Finding candidate {}", candidate_id);

        let query = r#"
            SELECT candidate_id, candidate_name, schedule_id
            FROM candidates
            WHERE candidate_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(candidate_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find candidate: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(candidate_from_row).transpose()
    }

    async fn find_by_schedule(&self, schedule_id: &str) -> Result<Vec<Candidate>, DbError> {
        debug!("Finding candidates of schedule {}", schedule_id);

        let query = r#"
            SELECT candidate_id, candidate_name, schedule_id
            FROM candidates
            WHERE schedule_id = $1
            ORDER BY candidate_id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(schedule_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find candidates: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(candidate_from_row).collect()
    }
}
