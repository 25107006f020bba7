// --- File: crates/services/schedulify_backend/src/app_state.rs ---
use schedulify_auth::SessionManager;
use schedulify_common::SchedulifyError;
use schedulify_config::AppConfig;
use schedulify_db::{init_schema, DbClient};
use std::sync::Arc;
use tracing::info;

/// Everything the routers are built from.
///
/// The session manager is shared by the auth and schedule routers so both
/// read the same cookie key.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db_client: DbClient,
    pub sessions: SessionManager,
}

impl AppState {
    /// Connects to the database, creates missing tables and sets up sessions.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, SchedulifyError> {
        let db_client = DbClient::from_config(&config.database).await?;
        init_schema(&db_client).await?;
        info!("Database ready at {}", config.database.url);

        let sessions = SessionManager::new(&config.auth)?;
        Ok(Self {
            config,
            db_client,
            sessions,
        })
    }
}
