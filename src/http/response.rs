//! Response translation back to the browser.
//!
//! # Responsibilities
//! - Pass the backend status and body bytes through unchanged
//! - Default the content type to JSON when the backend gives none
//! - Render every relay failure as the structured 502 body
//! - Attach CORS headers to both
//!
//! # Design Decisions
//! - The backend body is buffered (inside the timeout), not streamed, so a
//!   stall mid-body still ends in a clean 502
//! - Other backend headers are not copied back

use axum::body::{Body, Bytes};
use axum::http::header::{HeaderValue, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::http::error::RelayError;
use crate::security::apply_cors;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// The backend's answer, fully read.
#[derive(Debug, Clone)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        headers.insert(
            CONTENT_TYPE,
            self.content_type
                .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE)),
        );
        apply_cors(headers);
        response
    }
}

/// Body of every relay failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayErrorBody {
    pub detail: &'static str,
    pub error: String,
    pub url: String,
    #[serde(rename = "backendUrl")]
    pub backend_url: String,
}

impl RelayErrorBody {
    pub const DETAIL: &'static str = "Backend connectivity error";

    pub fn new(error: &RelayError, url: &str, backend_url: &str) -> Self {
        Self {
            detail: Self::DETAIL,
            error: error.to_string(),
            url: url.to_string(),
            backend_url: backend_url.to_string(),
        }
    }
}

impl IntoResponse for RelayErrorBody {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::BAD_GATEWAY, Json(self)).into_response();
        apply_cors(response.headers_mut());
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
    use std::time::Duration;

    #[test]
    fn passthrough_defaults_content_type() {
        let response = RelayResponse {
            status: StatusCode::CREATED,
            content_type: None,
            body: Bytes::from_static(b"{}"),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn passthrough_keeps_backend_content_type() {
        let response = RelayResponse {
            status: StatusCode::OK,
            content_type: Some(HeaderValue::from_static("text/csv")),
            body: Bytes::from_static(b"a,b\n"),
        }
        .into_response();
        assert_eq!(response.headers()[CONTENT_TYPE], "text/csv");
    }

    #[test]
    fn error_body_shape() {
        let body = RelayErrorBody::new(
            &RelayError::Timeout(Duration::from_secs(30)),
            "http://backend:1679/api/v1/users",
            "http://backend:1679",
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["detail"], "Backend connectivity error");
        assert_eq!(json["url"], "http://backend:1679/api/v1/users");
        assert_eq!(json["backendUrl"], "http://backend:1679");
        assert_eq!(json["error"], "backend did not respond within 30s");

        let response = body.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
