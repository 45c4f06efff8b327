//! Typed client for the console backend API.
//!
//! # Overview
//! ```text
//! façade (services.rs)
//!     → catalog.rs   (resource + operation → method, path)
//!     → client.rs    (base path join, auth header, body encoding, one call)
//!     → relay or backend
//! ```
//!
//! Errors from any layer surface as [`ClientError`]; the client never retries.

pub mod catalog;
pub mod client;
pub mod error;
pub mod services;

pub use catalog::{AuthAction, AuthRealm, DeviceKind, Endpoint, ListParams, Resource, DEFAULT_LIST_LIMIT};
pub use client::{join_url, ApiClient, ApiResponse, HttpMethod, RequestBody};
pub use error::ClientError;
pub use services::Api;
