use crate::error::{ServerError, ServerResult};
use crate::middleware::RequestId;
use crate::state::ServerState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use bridge::{SearchRequest, SearchResponse};
use std::sync::Arc;
use std::time::Instant;

/// Knowledge lookup.
///
/// The body is read leniently: anything that is not a JSON object counts as an
/// empty object and therefore fails validation with 400. Validation happens
/// before any upstream call.
pub async fn search(
    State(state): State<Arc<ServerState>>,
    request_id: Option<Extension<RequestId>>,
    body: Bytes,
) -> ServerResult<Json<SearchResponse>> {
    let start = Instant::now();
    let request_id = request_id.map(|Extension(id)| id.0).unwrap_or_default();

    let result = run_search(&state, &body).await;
    let elapsed = start.elapsed();

    match &result {
        Ok(response) => {
            metrics::counter!("bridge_requests_total", "outcome" => "ok").increment(1);
            metrics::histogram!("bridge_search_results")
                .record(response.search_results.len() as f64);
            tracing::info!(
                request_id = %request_id,
                results = response.search_results.len(),
                duration_ms = elapsed.as_millis() as u64,
                "search completed"
            );
        }
        Err(err) => {
            metrics::counter!("bridge_requests_total", "outcome" => err.outcome()).increment(1);
            match err {
                ServerError::BadRequest(_) => tracing::warn!(
                    request_id = %request_id,
                    error = %err,
                    "search rejected"
                ),
                _ => tracing::error!(
                    request_id = %request_id,
                    error = %err,
                    "search failed"
                ),
            }
        }
    }
    metrics::histogram!("bridge_request_duration_seconds").record(elapsed.as_secs_f64());

    result.map(Json)
}

async fn run_search(state: &ServerState, body: &[u8]) -> ServerResult<SearchResponse> {
    let request = SearchRequest::from_slice(body)?;
    Ok(state.pipeline.run(request).await?)
}
