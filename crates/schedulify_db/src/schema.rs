//! Table definitions
//!
//! Foreign keys point from availabilities and candidates at schedules, so a
//! schedule can only be removed after its dependants (see
//! [`crate::repositories::ScheduleAggregateRepository`]). Nothing cascades.

use crate::{error::DbError, DbClient};
use tracing::{debug, info};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY,
        username TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS schedules (
        schedule_id TEXT PRIMARY KEY,
        schedule_name TEXT NOT NULL,
        memo TEXT NOT NULL,
        created_by INTEGER NOT NULL REFERENCES users (user_id),
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS schedules_created_by ON schedules (created_by)",
    r#"
    CREATE TABLE IF NOT EXISTS candidates (
        candidate_id INTEGER PRIMARY KEY AUTOINCREMENT,
        candidate_name TEXT NOT NULL,
        schedule_id TEXT NOT NULL REFERENCES schedules (schedule_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS candidates_schedule_id ON candidates (schedule_id)",
    r#"
    CREATE TABLE IF NOT EXISTS availabilities (
        candidate_id INTEGER NOT NULL REFERENCES candidates (candidate_id),
        user_id INTEGER NOT NULL REFERENCES users (user_id),
        availability INTEGER NOT NULL DEFAULT 0,
        schedule_id TEXT NOT NULL REFERENCES schedules (schedule_id),
        PRIMARY KEY (candidate_id, user_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS availabilities_schedule_id ON availabilities (schedule_id)",
];

/// Create all tables and indexes if they don't already exist.
pub async fn init_schema(db_client: &DbClient) -> Result<(), DbError> {
    debug!("Initializing schedulify schema");

    for statement in SCHEMA {
        db_client.execute(statement).await?;
    }

    info!("Schedulify schema initialized successfully");
    Ok(())
}
