use axum::{
    routing::{get, post},
    Router,
};
use schedulify_auth::SessionManager;
use schedulify_db::{DbClient, Repositories};

use crate::handlers::{
    create_schedule, index, new_schedule_form, show_schedule, update_availability, ScheduleState,
};

impl ScheduleState {
    pub fn new(sessions: SessionManager, db_client: DbClient) -> Self {
        Self {
            sessions,
            repos: Repositories::new(db_client),
        }
    }
}

/// Creates a router containing the top page and all schedule routes.
pub fn routes(state: ScheduleState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/schedules", post(create_schedule))
        .route("/schedules/new", get(new_schedule_form))
        .route("/schedules/{schedule_id}", get(show_schedule))
        .route(
            "/schedules/{schedule_id}/users/{user_id}/candidates/{candidate_id}",
            post(update_availability),
        )
        .with_state(state)
}
