//! Inbound request model and its translation into the outbound call.
//!
//! # Responsibilities
//! - Compute the backend destination from the mount-relative path and query
//! - Keep only allow-listed headers
//! - Read the body for methods that carry one, under a size ceiling
//!
//! # Design Decisions
//! - Path and query are appended verbatim; percent-encoding is not touched
//! - Bodies stay as bytes so non-UTF-8 payloads pass unaltered
//! - GET and HEAD never carry a body, even when the browser sent one

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, Uri};

use crate::config::RelaySettings;
use crate::http::error::RelayError;
use crate::security::forwardable_headers;

/// Everything needed for exactly one outbound call.
#[derive(Debug, Clone)]
pub struct RelayRequest {
    pub method: Method,
    /// Inbound path, kept for logs.
    pub inbound_path: String,
    pub destination: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl RelayRequest {
    /// Capture an inbound request, consuming its body when the method allows one.
    pub async fn from_inbound(
        request: Request<Body>,
        settings: &RelaySettings,
    ) -> Result<Self, RelayError> {
        let (parts, body) = request.into_parts();
        let destination = destination_url(settings, &parts.uri);

        let body = if carries_body(&parts.method) {
            let bytes = axum::body::to_bytes(body, settings.max_body_size)
                .await
                .map_err(RelayError::Body)?;
            Some(bytes).filter(|b| !b.is_empty())
        } else {
            None
        };

        Ok(Self {
            method: parts.method,
            inbound_path: parts.uri.path().to_string(),
            destination,
            headers: forwardable_headers(&parts.headers),
            body,
        })
    }

    /// Build the outbound request for the hyper client.
    pub fn to_outbound(&self) -> Result<Request<Body>, RelayError> {
        let mut builder = Request::builder()
            .method(self.method.clone())
            .uri(self.destination.as_str());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers.clone());
        }

        let body = match &self.body {
            Some(bytes) => Body::from(bytes.clone()),
            None => Body::empty(),
        };

        builder
            .body(body)
            .map_err(|source| RelayError::InvalidDestination {
                url: self.destination.clone(),
                source,
            })
    }
}

fn carries_body(method: &Method) -> bool {
    method != Method::GET && method != Method::HEAD
}

/// Path left after removing the mount prefix, without its leading slash.
pub fn mount_relative_path<'a>(path: &'a str, mount_prefix: &str) -> &'a str {
    let rest = path.strip_prefix(mount_prefix).unwrap_or(path);
    rest.strip_prefix('/').unwrap_or(rest)
}

/// `<origin><api_prefix>/<rest>[?query]`
pub fn destination_url(settings: &RelaySettings, uri: &Uri) -> String {
    let rest = mount_relative_path(uri.path(), &settings.mount_prefix);
    let api_prefix = settings
        .api_prefix
        .strip_suffix('/')
        .unwrap_or(&settings.api_prefix);

    let mut url = format!("{}{}/{}", settings.origin(), api_prefix, rest);
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}
