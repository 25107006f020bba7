//! SQL implementation of the schedule aggregate repository

use crate::client::DbTransaction;
use crate::error::DbError;
use crate::repositories::aggregate::{ScheduleAggregate, ScheduleAggregateRepository};
use crate::repositories::candidate::Candidate;
use crate::repositories::schedule::{NewSchedule, Schedule};
use crate::DbClient;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::Row;
use tracing::{debug, error, info};
use uuid::Uuid;

/// SQL implementation of the schedule aggregate repository
#[derive(Debug, Clone)]
pub struct SqlScheduleAggregateRepository {
    db_client: DbClient,
}

impl SqlScheduleAggregateRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

async fn insert_candidate(
    tx: &mut DbTransaction<'static>,
    schedule_id: &str,
    candidate_name: String,
) -> Result<Candidate, DbError> {
    let row = sqlx::query(
        "INSERT INTO candidates (candidate_name, schedule_id) VALUES ($1, $2) RETURNING candidate_id",
    )
    .bind(&candidate_name)
    .bind(schedule_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        error!("Failed to insert candidate: {}", e);
        DbError::QueryError(e.to_string())
    })?;

    Ok(Candidate {
        candidate_id: row.try_get("candidate_id")?,
        candidate_name,
        schedule_id: schedule_id.to_string(),
    })
}

async fn delete_where_schedule(
    tx: &mut DbTransaction<'static>,
    table: &str,
    schedule_id: &str,
) -> Result<u64, DbError> {
    let query = format!("DELETE FROM {} WHERE schedule_id = $1", table);
    let result = sqlx::query(&query)
        .bind(schedule_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to delete from {}: {}", table, e);
            DbError::QueryError(e.to_string())
        })?;

    debug!("Deleted {} rows from {}", result.rows_affected(), table);
    Ok(result.rows_affected())
}

/// Commits on success. On failure rolls back and returns the original error.
async fn finish<T>(
    tx: DbTransaction<'static>,
    result: Result<T, DbError>,
) -> Result<T, DbError> {
    match result {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                error!("Failed to roll back transaction: {}", rollback_err);
            }
            Err(err)
        }
    }
}

async fn insert_rows(
    tx: &mut DbTransaction<'static>,
    schedule_id: &str,
    new_schedule: &NewSchedule,
    updated_at: DateTime<Utc>,
    candidate_names: Vec<String>,
) -> Result<Vec<Candidate>, DbError> {
    sqlx::query(
        r#"
        INSERT INTO schedules (schedule_id, schedule_name, memo, created_by, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(schedule_id)
    .bind(&new_schedule.schedule_name)
    .bind(&new_schedule.memo)
    .bind(new_schedule.created_by)
    .bind(updated_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        error!("Failed to insert schedule: {}", e);
        DbError::QueryError(e.to_string())
    })?;

    let mut candidates = Vec::with_capacity(candidate_names.len());
    for candidate_name in candidate_names {
        candidates.push(insert_candidate(tx, schedule_id, candidate_name).await?);
    }
    Ok(candidates)
}

/// Children first, so foreign keys hold at every step.
async fn delete_rows(tx: &mut DbTransaction<'static>, schedule_id: &str) -> Result<u64, DbError> {
    delete_where_schedule(tx, "availabilities", schedule_id).await?;
    delete_where_schedule(tx, "candidates", schedule_id).await?;
    delete_where_schedule(tx, "schedules", schedule_id).await
}

impl ScheduleAggregateRepository for SqlScheduleAggregateRepository {
    async fn create_schedule_aggregate(
        &self,
        new_schedule: NewSchedule,
        candidate_names: Vec<String>,
    ) -> Result<ScheduleAggregate, DbError> {
        let schedule_id = Uuid::new_v4().to_string();
        let updated_at = Utc::now().trunc_subsecs(6);
        debug!(
            "Creating schedule {} with {} candidates",
            schedule_id,
            candidate_names.len()
        );

        let mut tx = self.db_client.begin().await?;
        let result = insert_rows(
            &mut tx,
            &schedule_id,
            &new_schedule,
            updated_at,
            candidate_names,
        )
        .await;
        let candidates = finish(tx, result).await?;

        info!("Created schedule {}", schedule_id);
        Ok(ScheduleAggregate {
            schedule: Schedule {
                schedule_id,
                schedule_name: new_schedule.schedule_name,
                memo: new_schedule.memo,
                created_by: new_schedule.created_by,
                updated_at,
            },
            candidates,
        })
    }

    async fn delete_schedule_aggregate(&self, schedule_id: &str) -> Result<bool, DbError> {
        debug!("Deleting schedule aggregate {}", schedule_id);

        let mut tx = self.db_client.begin().await?;
        let result = delete_rows(&mut tx, schedule_id).await;
        let removed = finish(tx, result).await?;

        info!("Deleted schedule aggregate {} (found: {})", schedule_id, removed > 0);
        Ok(removed > 0)
    }
}
