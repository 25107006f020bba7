// File: services/schedulify_backend/src/main.rs
use schedulify_backend::{build_router, AppState};
use schedulify_common::{config_error, log_result, SchedulifyError};
use schedulify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), SchedulifyError> {
    schedulify_common::logging::init();

    let config = Arc::new(load_config().map_err(config_error)?);
    let state = log_result(
        AppState::new(config.clone()).await,
        "Application state initialized",
        "Failed to initialize application state",
    )?;
    let app = build_router(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
