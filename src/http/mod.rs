//! Relay gateway subsystem.
//!
//! # Data Flow
//! ```text
//! Browser request under the mount prefix
//!     → server.rs (Axum router, request ID, trace span)
//!     → request.rs (destination, header allow-list, body read)
//!     → resilience::timeouts (one deadline over the backend exchange)
//!     → response.rs (status/body passthrough or structured 502, CORS)
//!     → Send to browser
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::RelayError;
pub use request::RelayRequest;
pub use response::{RelayErrorBody, RelayResponse};
pub use server::RelayServer;
