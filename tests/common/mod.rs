//! Shared utilities for relay integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::Response,
    Router,
};
use iot_relay::config::{RelayConfig, RelaySettings};
use iot_relay::http::RelayServer;
use iot_relay::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// What the mock backend answers with.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.as_bytes().to_vec(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct BackendState {
    reply: Reply,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

/// A catch-all backend that records every request and answers with a fixed reply.
pub struct MockBackend {
    pub addr: SocketAddr,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub async fn start(reply: Reply) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            reply,
            recorded: recorded.clone(),
        };
        let app = Router::new().fallback(capture).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, recorded }
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }
}

async fn capture(State(state): State<BackendState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    state.recorded.lock().unwrap().push(Recorded {
        method: parts.method,
        uri: parts.uri.to_string(),
        headers: parts.headers,
        body,
    });

    tokio::time::sleep(state.reply.delay).await;

    let mut response = Response::new(Body::from(state.reply.body.clone()));
    *response.status_mut() = StatusCode::from_u16(state.reply.status).unwrap();
    if let Some(content_type) = state.reply.content_type {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, content_type.parse().unwrap());
    }
    response
}

/// Relay settings pointed at `origin`, with defaults elsewhere.
pub fn settings_for(origin: &str) -> RelaySettings {
    RelaySettings {
        backend_origin: Some(origin.to_string()),
        ..RelaySettings::default()
    }
}

/// An origin nothing listens on.
pub async fn unreachable_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A running relay. Dropping it does not stop the server; call `stop`.
pub struct RunningRelay {
    pub base_url: String,
    shutdown: Shutdown,
}

impl RunningRelay {
    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Start the relay on an ephemeral port. `base_url` includes the mount prefix.
pub async fn start_relay(settings: RelaySettings) -> RunningRelay {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    let mount = settings.mount_prefix.clone();
    config.relay = settings;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = RelayServer::new(config);
    tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });

    RunningRelay {
        base_url: format!("http://{addr}{mount}"),
        shutdown,
    }
}
