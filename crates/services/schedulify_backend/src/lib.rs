// --- File: crates/services/schedulify_backend/src/lib.rs ---
pub mod app_state;

pub use app_state::AppState;

use axum::Router;
use schedulify_auth::AuthState;
use schedulify_schedules::ScheduleState;
use tower_http::trace::TraceLayer;

/// Merges every feature router and wraps the result in a request trace layer.
pub fn build_router(state: &AppState) -> Router {
    let auth_state = AuthState::new(
        &state.config.auth,
        state.sessions.clone(),
        state.db_client.clone(),
    );
    let schedule_state = ScheduleState::new(state.sessions.clone(), state.db_client.clone());

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .merge(schedulify_auth::routes(auth_state))
        .merge(schedulify_schedules::routes(schedule_state));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use schedulify_schedules::doc::SchedulesApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Schedulify API",
                version = "0.1.0",
                description = "JSON endpoints of the Schedulify web app",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            tags((name = "Schedulify", description = "Core service endpoints"))
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SchedulesApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");

        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    app.layer(TraceLayer::new_for_http())
}
