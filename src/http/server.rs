//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum Router with the catch-all relay handler
//! - Wire up middleware (tracing, request ID)
//! - Bind the server to a listener
//! - Drive the pipeline: decide, translate, forward, compose
//! - Hand the telemetry record off after the response is finalized

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, State},
    http::{header, Request},
    response::Response,
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::response::{self, Reply};
use crate::proxy::blocklist::Blocklist;
use crate::proxy::dispatch::{decide, Outcome};
use crate::proxy::forward::Forwarder;
use crate::proxy::translate::{self, method_carries_body};
use crate::proxy::PipelineError;
use crate::telemetry::{TelemetryRecord, TelemetrySink};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub blocklist: Arc<Blocklist>,
    pub forwarder: Arc<Forwarder>,
    pub telemetry: Arc<TelemetrySink>,
    pub max_body_bytes: usize,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let state = AppState {
            blocklist: Arc::new(Blocklist::new(config.blocklist.keywords.clone())),
            forwarder: Arc::new(Forwarder::new()),
            telemetry: Arc::new(TelemetrySink::new(config.telemetry.clone())),
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            blocklist_keywords = self.config.blocklist.keywords.len(),
            telemetry_enabled = self.config.telemetry.enabled,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main relay handler.
///
/// Every failure inside the pipeline is converted to the fixed 500 JSON
/// shape here; nothing propagates to the caller as an unhandled fault.
async fn relay_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let method = request.method().clone();
    let inbound_path = request.uri().path().to_string();
    // The pipeline consumes the request; snapshot what telemetry and the
    // composer need first.
    let inbound_headers = request.headers().clone();
    let requested_allow_headers = request
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .cloned();

    let reply = match run_pipeline(&state, request).await {
        Ok(reply) => reply,
        Err(error) => {
            tracing::warn!(method = %method, path = %inbound_path, error = %error, "Exchange failed");
            response::error(&error.to_string())
        }
    };

    let response = response::compose(requested_allow_headers.as_ref(), reply);

    let record = TelemetryRecord::new(
        &method,
        response.status(),
        &inbound_headers,
        peer,
        &inbound_path,
    );
    state.telemetry.dispatch(record);

    response
}

/// The fallible part of the exchange: decode, decide, translate, forward.
async fn run_pipeline(state: &AppState, request: Request<Body>) -> Result<Reply, PipelineError> {
    let (parts, body) = request.into_parts();

    // Everything after the leading slash is the destination, query string
    // included.
    let raw = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let fragment = urlencoding::decode(raw.strip_prefix('/').unwrap_or(raw))?.into_owned();

    match decide(&parts.method, &fragment, &state.blocklist) {
        Outcome::UsageInfo { invalid } => {
            tracing::debug!(fragment = %fragment, invalid, "Usage-info reply");
            Ok(response::usage_info(invalid))
        }
        Outcome::Blocked { keywords } => {
            tracing::info!(fragment = %fragment, keywords = ?keywords, "Destination blocklisted");
            Ok(response::blocked(&keywords))
        }
        Outcome::Proxied { url } => {
            let bytes = if method_carries_body(&parts.method) {
                axum::body::to_bytes(body, state.max_body_bytes).await?
            } else {
                Bytes::new()
            };

            let spec = translate::translate(&parts.method, &parts.headers, bytes).await?;
            let upstream = state.forwarder.execute(&url, spec).await?;

            tracing::debug!(
                url = %url,
                status = %upstream.status,
                status_text = %upstream.status_text,
                "Relaying upstream response"
            );
            Ok(response::relay(upstream))
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
