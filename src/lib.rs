//! IoT admin relay gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                 RELAY GATEWAY                │
//!   Browser request     │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//!   ────────────────────┼─▶│  http    │──▶│ security  │──▶│resilience│─┼──▶ Backend
//!   <mount>/<path>?q    │  │ server   │   │ allow-list│   │ timeout │  │   <origin>/api/v1/<path>?q
//!                       │  └──────────┘   └───────────┘   └─────────┘  │
//!   Browser response    │  ┌──────────┐   ┌───────────┐                │
//!   ◀───────────────────┼──│ response │◀──│ CORS      │◀───────────────┼─── status + body
//!                       │  └──────────┘   └───────────┘                │
//!                       │  config · observability · lifecycle          │
//!                       └──────────────────────────────────────────────┘
//! ```
//!
//! The typed endpoint catalog, request client and resource façades live in
//! the `iot-relay-sdk` workspace member.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::RelayConfig;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
