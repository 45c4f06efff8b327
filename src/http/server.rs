//! Relay server setup.
//!
//! # Responsibilities
//! - Create the Axum Router for the mount prefix
//! - Wire up middleware (tracing, request ID)
//! - Forward each inbound call to the backend exactly once
//! - Translate the outcome, success or failure, into a CORS-annotated response
//! - Serve until shutdown is triggered or a termination signal arrives

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use http_body_util::BodyExt;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{RelayConfig, RelaySettings};
use crate::http::error::RelayError;
use crate::http::request::{destination_url, RelayRequest};
use crate::http::response::{RelayErrorBody, RelayResponse};
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::resilience::timeouts;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<RelaySettings>,
    pub client: Client<HttpConnector, Body>,
    pub timeout: Duration,
}

/// HTTP server for the relay gateway.
pub struct RelayServer {
    router: Router,
    config: RelayConfig,
}

impl RelayServer {
    /// Create a relay server from a validated configuration.
    pub fn new(config: RelayConfig) -> Self {
        let router = Self::build_router(config.relay.clone());
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(settings: RelaySettings) -> Router {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let mount = settings.mount_prefix.clone();

        let state = AppState {
            timeout: Duration::from_secs(settings.timeout_secs),
            settings: Arc::new(settings),
            client,
        };

        Router::new()
            .route(&mount, any(relay_handler))
            .route(&format!("{mount}/"), any(relay_handler))
            .route(&format!("{mount}/{{*path}}"), any(relay_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// A clone of the router, for in-process use without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires or the process is asked to stop.
    ///
    /// Returns once in-flight requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount = %self.config.relay.mount_prefix,
            backend = %self.config.relay.origin(),
            "Relay listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown triggered"),
                    signal = signals::wait_for_termination() => {
                        tracing::info!(signal, "Shutdown signal received");
                    }
                }
            })
            .await?;

        tracing::info!("Relay stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Relay one inbound call. Never fails: errors become the structured 502.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let destination = destination_url(&state.settings, request.uri());

    let response = match forward(&state, request).await {
        Ok(relayed) => relayed.into_response(),
        Err(err) => {
            tracing::error!(
                method = %method,
                url = %destination,
                reason = err.kind(),
                error = %err,
                "Backend connectivity error"
            );
            RelayErrorBody::new(&err, &destination, state.settings.origin()).into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

async fn forward(state: &AppState, request: Request<Body>) -> Result<RelayResponse, RelayError> {
    let relay = RelayRequest::from_inbound(request, &state.settings).await?;
    tracing::debug!(
        method = %relay.method,
        path = %relay.inbound_path,
        url = %relay.destination,
        has_body = relay.body.is_some(),
        "Relaying request"
    );

    let outbound = relay.to_outbound()?;
    let relayed = timeouts::within(state.timeout, async {
        let response = state.client.request(outbound).await?;
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(RelayError::ResponseBody)?
            .to_bytes();

        Ok(RelayResponse {
            status: parts.status,
            content_type: parts.headers.get(CONTENT_TYPE).cloned(),
            body,
        })
    })
    .await?;

    if !relayed.status.is_success() {
        tracing::warn!(
            method = %relay.method,
            url = %relay.destination,
            status = relayed.status.as_u16(),
            "Backend returned non-success status"
        );
    }

    Ok(relayed)
}
