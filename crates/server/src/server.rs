//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration (health, search, optional metrics)
//! - Middleware stack (auth on search only, request ids, logging, tracing)
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{api_key_auth, log_requests, request_id};
use crate::routes::health::{health, render_metrics};
use crate::routes::not_found;
use crate::routes::search::search;
use crate::state::ServerState;
use crate::telemetry::init_metrics;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the Axum router.
///
/// `GET /` is public. `POST /` passes through API key authentication when a
/// secret is configured. `/metrics` is only routed when a Prometheus handle is
/// present in the state.
///
/// Middleware stack (outermost first):
/// 1. HTTP tracing
/// 2. Request ID tracking
/// 3. Request logging
/// 4. Body size limit
pub fn build_router(state: Arc<ServerState>) -> Router {
    let root = get(health).merge(
        post(search).route_layer(from_fn_with_state(state.clone(), api_key_auth)),
    );

    let mut router = Router::new().route("/", root);
    if state.metrics.is_some() {
        router = router.route("/metrics", get(render_metrics));
    }

    router
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the knowledge-bridge HTTP server
///
/// Builds the upstream clients, binds the configured address and serves until
/// SIGTERM or Ctrl+C. Tracing must already be initialized.
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     server::telemetry::init_tracing();
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();

    let mut state = ServerState::new(config.clone())?;
    if config.metrics_enabled {
        state = state.with_metrics(init_metrics()?);
    }
    let app = build_router(Arc::new(state));

    tracing::info!(
        addr = %addr,
        index_host = %config.index_host,
        index_name = config.index_name.as_deref().unwrap_or("-"),
        namespace = %config.namespace,
        embed_model = %config.embed_model,
        top_k = config.top_k,
        auth_enabled = config.knowledge_api_key.is_some(),
        metrics_enabled = config.metrics_enabled,
        "Starting knowledge-bridge server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
