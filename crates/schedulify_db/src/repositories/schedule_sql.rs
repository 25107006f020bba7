//! SQL implementation of the schedule repository

use crate::error::DbError;
use crate::repositories::schedule::{Schedule, ScheduleRepository};
use crate::DbClient;
use chrono::{DateTime, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the schedule repository
#[derive(Debug, Clone)]
pub struct SqlScheduleRepository {
    db_client: DbClient,
}

impl SqlScheduleRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

// DateTime<Utc> doesn't implement Decode for sqlx::Any, so timestamps are stored as RFC 3339 text.
pub(crate) fn schedule_from_row(row: &AnyRow) -> Result<Schedule, DbError> {
    let updated_at: String = row.try_get("updated_at")?;
    let updated_at = DateTime::parse_from_rfc3339(&updated_at)
        .map_err(|e| DbError::DecodeError(format!("updated_at {:?}: {}", updated_at, e)))?
        .with_timezone(&Utc);

    Ok(Schedule {
        schedule_id: row.try_get("schedule_id")?,
        schedule_name: row.try_get("schedule_name")?,
        memo: row.try_get("memo")?,
        created_by: row.try_get("created_by")?,
        updated_at,
    })
}

impl ScheduleRepository for SqlScheduleRepository {
    async fn find_by_id(&self, schedule_id: &str) -> Result<Option<Schedule>, DbError> {
        debug!("Finding schedule {}", schedule_id);

        let query = r#"
            SELECT schedule_id, schedule_name, memo, created_by, updated_at
            FROM schedules
            WHERE schedule_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(schedule_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find schedule: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(schedule_from_row).transpose()
    }

    async fn find_by_owner(&self, user_id: i64) -> Result<Vec<Schedule>, DbError> {
        debug!("Finding schedules created by user {}", user_id);

        let query = r#"
            SELECT schedule_id, schedule_name, memo, created_by, updated_at
            FROM schedules
            WHERE created_by = $1
            ORDER BY updated_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find schedules: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(schedule_from_row).collect()
    }
}
