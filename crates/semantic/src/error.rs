use thiserror::Error;

/// Errors surfaced by an [`Embedder`](crate::Embedder).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SemanticError {
    /// Configuration is unusable (e.g. an empty API key).
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),
    /// The HTTP request never produced a response.
    #[error("embedding request failed: {0}")]
    Request(String),
    /// The provider answered with a non-success status.
    #[error("embedding provider returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The provider answered, but not with something we can read.
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
    /// The response parsed but carried no embeddings.
    #[error("embedding response did not contain any embeddings")]
    EmptyResponse,
}

impl From<reqwest::Error> for SemanticError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SemanticError::InvalidResponse(err.to_string())
        } else {
            SemanticError::Request(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_and_body() {
        let err = SemanticError::Status {
            status: 401,
            body: "Incorrect API key provided".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Incorrect API key provided"));
    }

    #[test]
    fn invalid_config_message() {
        let err = SemanticError::InvalidConfig("api_key is empty".into());
        assert_eq!(err.to_string(), "invalid embedding config: api_key is empty");
    }

    #[test]
    fn empty_response_message() {
        assert!(SemanticError::EmptyResponse
            .to_string()
            .contains("did not contain any embeddings"));
    }
}
