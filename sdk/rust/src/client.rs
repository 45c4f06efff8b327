//! Generic request function shared by every resource façade.
//!
//! # Responsibilities
//! - Join a base path and an endpoint path without doubled or missing slashes
//! - Attach `Authorization: Bearer` only when a token is supplied
//! - Encode the body according to its kind (JSON text or multipart form)
//! - Perform exactly one network call and normalize the outcome
//!
//! # Design Decisions
//! - No retries and no caching: each call is one isolated round trip
//! - Request construction is split from execution so header policy can be
//!   checked without a network
//! - A non-JSON success carries no body contract and yields [`ApiResponse::Success`]

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::Endpoint;
use crate::error::ClientError;

/// Total per-call deadline applied by [`ApiClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Methods the backend API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        };
        f.write_str(name)
    }
}

/// Request payload.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Pre-serialized JSON text, sent with `Content-Type: application/json`.
    Json(String),
    /// Multipart form; the transport sets the boundary-bearing content type.
    Multipart(Form),
}

impl RequestBody {
    /// Serialize `value` into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ClientError> {
        serde_json::to_string(value)
            .map(RequestBody::Json)
            .map_err(ClientError::Encode)
    }
}

/// Normalized successful outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Decoded JSON body.
    Json(Value),
    /// The backend succeeded without a JSON body.
    Success,
}

impl ApiResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Success => None,
        }
    }

    /// JSON view of the outcome; the success marker renders as `{"success": true}`.
    pub fn into_value(self) -> Value {
        match self {
            ApiResponse::Json(value) => value,
            ApiResponse::Success => serde_json::json!({ "success": true }),
        }
    }

    /// Deserialize the outcome into a typed value.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        serde_json::from_value(self.into_value()).map_err(ClientError::Decode)
    }
}

/// Join `base` and `endpoint` with exactly one separating slash.
///
/// Exactly one trailing slash is trimmed from `base`; a leading slash is
/// added to `endpoint` only when missing.
pub fn join_url(base: &str, endpoint: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    if endpoint.starts_with('/') {
        format!("{base}{endpoint}")
    } else {
        format!("{base}/{endpoint}")
    }
}

/// HTTP client bound to a default base path (typically the relay mount).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_path: String,
}

impl ApiClient {
    /// Create a client for `base_path` with the default 30 second deadline.
    pub fn new(base_path: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_path, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_path: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_path: base_path.to_string(),
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Build, without sending, the request for one API call.
    pub fn build_request(
        &self,
        base_path: &str,
        endpoint: &str,
        token: Option<&str>,
        method: HttpMethod,
        body: RequestBody,
    ) -> Result<reqwest::Request, ClientError> {
        let url = join_url(base_path, endpoint);
        let mut builder = self.http.request(method.into(), url);

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(text) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(text),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        Ok(builder.build()?)
    }

    /// Issue one API call and normalize its outcome.
    pub async fn get_api_response(
        &self,
        base_path: &str,
        endpoint: &str,
        token: Option<&str>,
        method: HttpMethod,
        body: RequestBody,
    ) -> Result<ApiResponse, ClientError> {
        let result = self
            .execute(self.build_request(base_path, endpoint, token, method, body)?)
            .await;
        if let Err(e) = &result {
            tracing::warn!(method = %method, endpoint = %endpoint, error = %e, "API request failed");
        }
        result
    }

    /// Call a catalog endpoint against this client's base path.
    pub async fn call(
        &self,
        endpoint: &Endpoint<'_>,
        token: Option<&str>,
        body: RequestBody,
    ) -> Result<ApiResponse, ClientError> {
        self.get_api_response(&self.base_path, &endpoint.path(), token, endpoint.method(), body)
            .await
    }

    async fn execute(&self, request: reqwest::Request) -> Result<ApiResponse, ClientError> {
        tracing::debug!(method = %request.method(), url = %request.url(), "API request");
        let response = self.http.execute(request).await?;
        interpret_response(response).await
    }
}

/// Classify a backend response.
pub async fn interpret_response(response: reqwest::Response) -> Result<ApiResponse, ClientError> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes).map_err(ClientError::Decode)?;
        if !status.is_success() {
            return Err(ClientError::from_json_body(status.as_u16(), &value));
        }
        return Ok(ApiResponse::Json(value));
    }

    if !status.is_success() {
        return Err(ClientError::Backend {
            status: status.as_u16(),
            message: format!("API Error: {status}"),
            detail: None,
        });
    }

    Ok(ApiResponse::Success)
}
