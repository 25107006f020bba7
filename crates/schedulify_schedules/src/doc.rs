use utoipa::OpenApi;

use crate::logic::{AvailabilityForm, AvailabilityResponse};

/// OpenAPI documentation for the JSON endpoints of the schedule routes
#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::update_availability),
    components(schemas(AvailabilityForm, AvailabilityResponse)),
    tags(
        (name = "Schedules", description = "Availability answers for schedule candidates")
    )
)]
pub struct SchedulesApiDoc;
