//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Relay and SDK produce:
//!     → logging.rs (structured log events, pretty or JSON)
//!     → metrics.rs (request counter and latency histogram)
//!
//! Consumers:
//!     → stdout / log aggregation
//!     → Prometheus scrape (when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID comes from the tower-http layer and lands on the trace span
//! - Metrics go through the `metrics` facade; without an installed
//!   recorder they cost nothing

pub mod logging;
pub mod metrics;

pub use logging::init_tracing;
pub use metrics::{init_metrics, record_request};
