// --- File: crates/schedulify_schedules/src/body.rs ---
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;

/// A request body read as JSON when the client sends a JSON content type,
/// and as `application/x-www-form-urlencoded` otherwise.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(JsonOrForm(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(JsonOrForm(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Answer {
        availability: i64,
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn reads_json_body() {
        let req = request("application/json; charset=utf-8", r#"{"availability":2}"#);
        let JsonOrForm(answer) = JsonOrForm::<Answer>::from_request(req, &()).await.unwrap();
        assert_eq!(answer, Answer { availability: 2 });
    }

    #[tokio::test]
    async fn reads_form_body() {
        let req = request("application/x-www-form-urlencoded", "availability=1");
        let JsonOrForm(answer) = JsonOrForm::<Answer>::from_request(req, &()).await.unwrap();
        assert_eq!(answer, Answer { availability: 1 });
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let req = request("application/json", "{availability");
        let rejection = JsonOrForm::<Answer>::from_request(req, &()).await.unwrap_err();
        assert!(rejection.status().is_client_error());
    }
}
