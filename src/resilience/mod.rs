//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → timeouts.rs (one deadline over the full exchange)
//!     → On expiry: RelayError::Timeout → 502 connectivity body
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries: each inbound call is forwarded at most once, since a
//!   timed-out call may still have been acted on by the backend

pub mod timeouts;

pub use timeouts::within;
