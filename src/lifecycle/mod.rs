//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → every subscriber wakes → server stops accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup lives in main: config, tracing, metrics, bind, serve
//! - Ordered shutdown: stop accept, drain in-flight relays, close

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
