// --- File: crates/schedulify_common/src/http.rs ---
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{HttpStatusCode, SchedulifyError};

/// Extension trait for SchedulifyError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for SchedulifyError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for SchedulifyError so handlers can return `Result<_, SchedulifyError>`.
impl IntoResponse for SchedulifyError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// A `302 Found` response pointing at `location`.
///
/// axum's `Redirect` only offers 303/307/308; browsers and form posts here expect 302.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn not_found_becomes_json_404() {
        let response = SchedulifyError::NotFoundError("schedule abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], 404);
        assert_eq!(value["error"]["message"], "Not found: schedule abc");
    }

    #[test]
    fn found_sets_location() {
        let response = found("/schedules/1");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/schedules/1");
    }
}
