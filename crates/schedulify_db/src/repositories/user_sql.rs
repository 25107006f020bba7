//! SQL implementation of the user repository

use crate::error::DbError;
use crate::repositories::user::{User, UserRepository};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the user repository
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    db_client: DbClient,
}

impl SqlUserRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn user_from_row(row: &AnyRow) -> Result<User, DbError> {
    Ok(User {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
    })
}

impl UserRepository for SqlUserRepository {
    async fn upsert(&self, user: User) -> Result<User, DbError> {
        debug!("Upserting user {} ({})", user.user_id, user.username);

        let query = r#"
            INSERT INTO users (user_id, username)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET username = excluded.username
        "#;

        sqlx::query(query)
            .bind(user.user_id)
            .bind(&user.username)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(user)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, DbError> {
        debug!("Finding user {}", user_id);

        let row = sqlx::query("SELECT user_id, username FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_schedule(&self, schedule_id: &str) -> Result<Vec<User>, DbError> {
        debug!("Finding users answering schedule {}", schedule_id);

        let query = r#"
            SELECT DISTINCT u.user_id, u.username
            FROM users u
            JOIN availabilities a ON a.user_id = u.user_id
            WHERE a.schedule_id = $1
            ORDER BY u.user_id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(schedule_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find users for schedule: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(user_from_row).collect()
    }
}
