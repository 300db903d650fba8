use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Liveness probe. Always `{"ok": true}`; no upstream is contacted.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// Prometheus text exposition. Only routed when metrics are enabled.
pub async fn render_metrics(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let handle = state.metrics.as_ref().ok_or(ServerError::NotFound)?;
    Ok((
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
