// --- File: crates/schedulify_schedules/src/handlers.rs ---
use axum::{
    extract::{FromRef, Path, State},
    response::{Html, Response},
    Json,
};
use schedulify_auth::{CurrentUser, MaybeUser, SessionManager, SessionUser};
use schedulify_common::{found, not_found, SchedulifyError};
use schedulify_db::{
    Availability, AvailabilityRepository, CandidateRepository, NewSchedule, Repositories,
    ScheduleAggregateRepository, ScheduleRepository, User, UserRepository,
};
use tracing::{debug, info};

use crate::body::JsonOrForm;
use crate::logic::{
    normalize_schedule_name, parse_availability, parse_candidates, AvailabilityForm,
    AvailabilityMatrix, AvailabilityResponse, CreateScheduleForm,
};
use crate::views;

/// Shared state for the schedule routes.
#[derive(Clone)]
pub struct ScheduleState {
    pub sessions: SessionManager,
    pub repos: Repositories,
}

impl FromRef<ScheduleState> for SessionManager {
    fn from_ref(state: &ScheduleState) -> Self {
        state.sessions.clone()
    }
}

fn as_user(session: &SessionUser) -> User {
    User::new(session.id, session.username.clone())
}

/// Top page; lists the viewer's schedules, newest first.
#[axum::debug_handler]
pub async fn index(
    State(state): State<ScheduleState>,
    MaybeUser(user): MaybeUser,
) -> Result<Html<String>, SchedulifyError> {
    let schedules = match &user {
        Some(user) => state.repos.schedules.find_by_owner(user.id).await?,
        None => Vec::new(),
    };
    Ok(views::index_page(user.as_ref(), &schedules))
}

#[axum::debug_handler(state = ScheduleState)]
pub async fn new_schedule_form(CurrentUser(_user): CurrentUser) -> Html<String> {
    views::new_schedule_page()
}

/// Creates a schedule with its candidates and redirects to it.
#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<ScheduleState>,
    CurrentUser(user): CurrentUser,
    JsonOrForm(form): JsonOrForm<CreateScheduleForm>,
) -> Result<Response, SchedulifyError> {
    // The session may predate this database.
    state.repos.users.upsert(as_user(&user)).await?;

    let new_schedule = NewSchedule {
        schedule_name: normalize_schedule_name(&form.schedule_name),
        memo: form.memo,
        created_by: user.id,
    };
    let candidate_names = parse_candidates(&form.candidates);

    let created = state
        .repos
        .aggregates
        .create_schedule_aggregate(new_schedule, candidate_names)
        .await?;

    info!(
        "User {} created schedule {} with {} candidates",
        user.id,
        created.schedule.schedule_id,
        created.candidates.len()
    );
    Ok(found(&format!("/schedules/{}", created.schedule.schedule_id)))
}

/// Schedule detail page with the availability matrix.
#[axum::debug_handler]
pub async fn show_schedule(
    State(state): State<ScheduleState>,
    Path(schedule_id): Path<String>,
    MaybeUser(viewer): MaybeUser,
) -> Result<Html<String>, SchedulifyError> {
    let schedule = state
        .repos
        .schedules
        .find_by_id(&schedule_id)
        .await?
        .ok_or_else(|| not_found(format!("schedule {}", schedule_id)))?;

    let candidates = state.repos.candidates.find_by_schedule(&schedule_id).await?;
    let availabilities = state
        .repos
        .availabilities
        .find_by_schedule(&schedule_id)
        .await?;
    let answerers = state.repos.users.find_by_schedule(&schedule_id).await?;
    let owner = state.repos.users.find_by_id(schedule.created_by).await?;

    let matrix = AvailabilityMatrix::build(
        viewer.as_ref().map(as_user),
        answerers,
        candidates,
        &availabilities,
    );

    Ok(views::schedule_page(
        &schedule,
        owner.as_ref().map(|u| u.username.as_str()),
        viewer.as_ref(),
        &matrix,
    ))
}

/// Records one user's answer for one candidate.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/schedules/{schedule_id}/users/{user_id}/candidates/{candidate_id}",
    params(
        ("schedule_id" = String, Path, description = "Schedule id"),
        ("user_id" = i64, Path, description = "Answering user"),
        ("candidate_id" = i64, Path, description = "Candidate of the schedule")
    ),
    request_body(content = AvailabilityForm, content_type = "application/json", description = "Also accepted as application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Availability stored", body = AvailabilityResponse),
        (status = 302, description = "Not logged in; redirect to /login"),
        (status = 400, description = "Availability code is not 0, 1 or 2"),
        (status = 404, description = "Unknown schedule, candidate or user"),
        (status = 500, description = "Database error")
    ),
    tag = "Schedules"
))]
pub async fn update_availability(
    State(state): State<ScheduleState>,
    Path((schedule_id, user_id, candidate_id)): Path<(String, i64, i64)>,
    CurrentUser(current): CurrentUser,
    JsonOrForm(form): JsonOrForm<AvailabilityForm>,
) -> Result<Json<AvailabilityResponse>, SchedulifyError> {
    let code = parse_availability(&form.availability)?;

    let candidate = state
        .repos
        .candidates
        .find_by_id(candidate_id)
        .await?
        .filter(|c| c.schedule_id == schedule_id)
        .ok_or_else(|| {
            not_found(format!(
                "candidate {} of schedule {}",
                candidate_id, schedule_id
            ))
        })?;

    if user_id == current.id {
        state.repos.users.upsert(as_user(&current)).await?;
    } else if state.repos.users.find_by_id(user_id).await?.is_none() {
        return Err(not_found(format!("user {}", user_id)));
    }

    let stored = state
        .repos
        .availabilities
        .upsert(Availability {
            candidate_id: candidate.candidate_id,
            user_id,
            availability: code,
            schedule_id,
        })
        .await?;

    debug!(
        "User {} set availability {} on candidate {}",
        user_id, stored.availability, stored.candidate_id
    );
    Ok(Json(AvailabilityResponse::ok(stored.availability)))
}
