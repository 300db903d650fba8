use thiserror::Error;

/// Errors from a [`VectorIndex`](crate::VectorIndex) query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    #[error("invalid index config: {0}")]
    InvalidConfig(String),
    #[error("vector query request failed: {0}")]
    Request(String),
    #[error("vector index returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode vector query response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for IndexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            IndexError::Decode(err.to_string())
        } else {
            IndexError::Request(err.to_string())
        }
    }
}
