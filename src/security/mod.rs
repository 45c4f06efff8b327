//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (allow-list the headers forwarded to the backend)
//!     → Pass to relay
//! Outgoing response:
//!     → headers.rs (attach CORS headers, success or failure)
//! ```
//!
//! # Design Decisions
//! - Minimize what crosses between the two hosts
//! - No trust in client input

pub mod headers;

pub use headers::{apply_cors, forwardable_headers};
