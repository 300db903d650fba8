use crate::error::ServerError;
use crate::state::ServerState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Headers checked for a bare API key, in priority order.
const API_KEY_HEADERS: [&str; 2] = ["x-api-key", "api-key"];

/// Request id carried in request extensions and echoed as `x-request-id`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Shared-secret authentication.
///
/// A no-op when no secret is configured. Otherwise the request must carry the
/// secret in `x-api-key`, `api-key`, or `Authorization: Bearer|ApiKey <token>`;
/// anything else is rejected before the handler runs.
pub async fn api_key_auth(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if !state.auth_enabled() {
        return Ok(next.run(request).await);
    }

    match extract_api_key(request.headers()) {
        Some(key) if state.is_valid_api_key(key) => Ok(next.run(request).await),
        presented => {
            tracing::warn!(
                token_present = presented.is_some(),
                "rejecting unauthenticated request"
            );
            metrics::counter!("bridge_requests_total", "outcome" => "unauthorized").increment(1);
            Err(ServerError::Unauthorized)
        }
    }
}

/// Pick the candidate token out of the request headers.
///
/// The first source in priority order that yields a non-empty token wins:
/// `x-api-key`, then `api-key`, then an `Authorization` header whose scheme is
/// `Bearer` or `ApiKey` (case-insensitive).
pub fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    for name in API_KEY_HEADERS {
        let token = headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if token.is_some() {
            return token;
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_authorization)
}

fn parse_authorization(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(char::is_whitespace)?;
    if !(scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("apikey")) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Request ID injection middleware
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// Logging middleware
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    tracing::info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "Request started"
    );

    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_x_api_key_wins() {
        let h = headers(&[
            ("authorization", "Bearer from-auth"),
            ("api-key", "from-api-key"),
            ("x-api-key", "from-x"),
        ]);
        assert_eq!(extract_api_key(&h), Some("from-x"));
    }

    #[test]
    fn test_api_key_before_authorization() {
        let h = headers(&[("authorization", "Bearer b"), ("api-key", " k ")]);
        assert_eq!(extract_api_key(&h), Some("k"));
    }

    #[test]
    fn test_authorization_schemes_are_case_insensitive() {
        for value in ["Bearer tok", "bearer tok", "BEARER   tok ", "ApiKey tok", "apikey tok"] {
            let mut h = HeaderMap::new();
            h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
            assert_eq!(extract_api_key(&h), Some("tok"), "value: {value}");
        }
    }

    #[test]
    fn test_unknown_scheme_or_bare_token_is_ignored() {
        for value in ["Basic dXNlcjpwYXNz", "tok", "Bearer", "Bearer    "] {
            let mut h = HeaderMap::new();
            h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
            assert_eq!(extract_api_key(&h), None, "value: {value}");
        }
    }

    #[test]
    fn test_empty_header_falls_through_to_next_source() {
        let h = headers(&[("x-api-key", "  "), ("authorization", "Bearer tok")]);
        assert_eq!(extract_api_key(&h), Some("tok"));
    }

    #[test]
    fn test_no_headers() {
        assert_eq!(extract_api_key(&HeaderMap::new()), None);
    }
}
