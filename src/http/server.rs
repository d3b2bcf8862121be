//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all forwarding handler
//! - Wire up middleware (request id, tracing, timeout)
//! - Bind server to listener, serve with graceful shutdown
//! - Map the single runtime error class to 502 Bad Gateway

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ShimConfig, ValidationError};
use crate::forward::{ForwardError, ForwardSpec, UpstreamClient, UpstreamTarget};
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};

/// Failure to assemble the server from a loaded configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid upstream configuration: {0}")]
    Upstream(#[from] ValidationError),

    #[error("failed to build outbound client: {0}")]
    Client(#[from] ForwardError),
}

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub target: Arc<UpstreamTarget>,
    pub client: UpstreamClient,
}

/// HTTP server for the forwarding shim.
pub struct HttpServer {
    router: Router,
    config: ShimConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ShimConfig) -> Result<Self, BuildError> {
        let target = Arc::new(UpstreamTarget::from_config(&config.upstream)?);
        let client = UpstreamClient::new(&config.timeouts)?;

        let state = AppState { target, client };
        let router = Self::build_router(&config, state);

        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ShimConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ShimConfig {
        &self.config
    }
}

/// Main forwarding handler: rewrite the request against the upstream
/// target, issue the outbound call, return the response verbatim.
async fn forward_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response {
    let request_id = request_id(request.headers()).to_string();
    let (parts, body) = request.into_parts();

    let spec = ForwardSpec::from_parts(&parts, &state.target);

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %parts.uri.path(),
        target = %spec.url,
        "Forwarding request"
    );

    match state.client.send(spec, body).await {
        Ok(response) => {
            tracing::debug!(
                request_id = %request_id,
                status = %response.status(),
                "Upstream responded"
            );
            response
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                method = %parts.method,
                path = %parts.uri.path(),
                error = %e,
                "Upstream request failed"
            );
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
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
