// --- File: crates/schedulify_schedules/src/logic.rs ---
use schedulify_common::{validation_error, SchedulifyError};
use schedulify_db::{Availability, AvailabilityCode, Candidate, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Longest schedule name kept, in characters.
pub const MAX_SCHEDULE_NAME_CHARS: usize = 255;

/// Stored when the submitted name is blank.
pub const UNTITLED_SCHEDULE_NAME: &str = "(名称未設定)";

// --- Request / Response Structs ---

/// Form posted by the schedule creation page.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleForm {
    #[serde(rename = "scheduleName", default)]
    pub schedule_name: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub candidates: String,
}

/// The submitted code: a JSON number, or text from a form or JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AvailabilityValue {
    Number(i64),
    Text(String),
}

/// Body of the availability endpoint, form-encoded or JSON.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityForm {
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 2))]
    pub availability: AvailabilityValue,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AvailabilityResponse {
    #[cfg_attr(feature = "openapi", schema(example = "OK"))]
    pub status: String,
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 2))]
    pub availability: AvailabilityCode,
}

impl AvailabilityResponse {
    pub fn ok(availability: AvailabilityCode) -> Self {
        Self {
            status: "OK".to_string(),
            availability,
        }
    }
}

// --- Input Normalisation ---

/// Splits the candidate textarea into names: one per line, trimmed, blanks dropped.
pub fn parse_candidates(input: &str) -> Vec<String> {
    input
        .split('\n')
        .map(|line| line.trim_end_matches('\r').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn normalize_schedule_name(input: &str) -> String {
    let name: String = input.trim().chars().take(MAX_SCHEDULE_NAME_CHARS).collect();
    if name.is_empty() {
        UNTITLED_SCHEDULE_NAME.to_string()
    } else {
        name
    }
}

/// Non-integers and integers outside 0..=2 are both validation errors.
pub fn parse_availability(raw: &AvailabilityValue) -> Result<AvailabilityCode, SchedulifyError> {
    let code = match raw {
        AvailabilityValue::Number(code) => *code,
        AvailabilityValue::Text(text) => text.trim().parse().map_err(|_| {
            validation_error(format!("availability must be an integer, got {:?}", text))
        })?,
    };
    AvailabilityCode::try_from(code).map_err(validation_error)
}

// --- Availability Matrix ---

/// Answers of every listed user for every candidate of a schedule.
///
/// Users without a stored answer for a candidate read as
/// [`AvailabilityCode::Absent`].
#[derive(Debug, Clone)]
pub struct AvailabilityMatrix {
    pub users: Vec<User>,
    pub candidates: Vec<Candidate>,
    answers: HashMap<(i64, i64), AvailabilityCode>,
}

impl AvailabilityMatrix {
    /// `viewer` is listed first even before answering anything.
    pub fn build(
        viewer: Option<User>,
        answerers: Vec<User>,
        candidates: Vec<Candidate>,
        availabilities: &[Availability],
    ) -> Self {
        let mut users = Vec::with_capacity(answerers.len() + 1);
        if let Some(viewer) = viewer {
            users.push(viewer);
        }
        for user in answerers {
            if !users.iter().any(|u| u.user_id == user.user_id) {
                users.push(user);
            }
        }

        let answers = availabilities
            .iter()
            .map(|a| ((a.user_id, a.candidate_id), a.availability))
            .collect();

        Self {
            users,
            candidates,
            answers,
        }
    }

    pub fn get(&self, user_id: i64, candidate_id: i64) -> AvailabilityCode {
        self.answers
            .get(&(user_id, candidate_id))
            .copied()
            .unwrap_or_default()
    }

    /// Number of users present for a candidate.
    pub fn present_count(&self, candidate_id: i64) -> usize {
        self.users
            .iter()
            .filter(|u| self.get(u.user_id, candidate_id) == AvailabilityCode::Present)
            .count()
    }
}
