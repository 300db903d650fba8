use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bridge::PipelineError;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Request-level errors. Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    /// An embedding or vector-search call failed. Carries the upstream message.
    #[error("{0}")]
    Upstream(String),

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Upstream(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            ServerError::Unauthorized => "unauthorized",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::NotFound => "not_found",
            ServerError::Upstream(_) => "upstream_error",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        if err.is_client_error() {
            ServerError::BadRequest(err.to_string())
        } else {
            ServerError::Upstream(err.to_string())
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge::{IndexError, SemanticError};

    #[test]
    fn test_unauthorized_body() {
        let err = ServerError::Unauthorized;
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "unauthorized");
    }

    #[test]
    fn test_missing_query_is_bad_request() {
        let err: ServerError = PipelineError::MissingQuery.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "query (string) is required");
    }

    #[test]
    fn test_upstream_failures_are_500_with_message() {
        let err: ServerError = PipelineError::from(SemanticError::Request("dns error".into())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("dns error"));

        let err: ServerError = PipelineError::from(IndexError::Decode("eof".into())).into();
        assert_eq!(err.outcome(), "upstream_error");
    }
}
