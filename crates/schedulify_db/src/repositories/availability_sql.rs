//! SQL implementation of the availability repository

use crate::error::DbError;
use crate::repositories::availability::{Availability, AvailabilityCode, AvailabilityRepository};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the availability repository
#[derive(Debug, Clone)]
pub struct SqlAvailabilityRepository {
    db_client: DbClient,
}

impl SqlAvailabilityRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn availability_from_row(row: &AnyRow) -> Result<Availability, DbError> {
    let code: i64 = row.try_get("availability")?;
    let availability =
        AvailabilityCode::try_from(code).map_err(|e| DbError::DecodeError(e.to_string()))?;

    Ok(Availability {
        candidate_id: row.try_get("candidate_id")?,
        user_id: row.try_get("user_id")?,
        availability,
        schedule_id: row.try_get("schedule_id")?,
    })
}

impl AvailabilityRepository for SqlAvailabilityRepository {
    async fn upsert(&self, availability: Availability) -> Result<Availability, DbError> {
        debug!(
            "Upserting availability {} for user {} on candidate {}",
            availability.availability, availability.user_id, availability.candidate_id
        );

        let query = r#"
            INSERT INTO availabilities (candidate_id, user_id, availability, schedule_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (candidate_id, user_id) DO UPDATE SET availability = excluded.availability
        "#;

        sqlx::query(query)
            .bind(availability.candidate_id)
            .bind(availability.user_id)
            .bind(availability.availability.code())
            .bind(&availability.schedule_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert availability: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(availability)
    }

    async fn find_by_schedule(&self, schedule_id: &str) -> Result<Vec<Availability>, DbError> {
        debug!("Finding availabilities of schedule {}", schedule_id);

        let query = r#"
            SELECT candidate_id, user_id, availability, schedule_id
            FROM availabilities
            WHERE schedule_id = $1
            ORDER BY user_id ASC, candidate_id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(schedule_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find availabilities: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(availability_from_row).collect()
    }
}
