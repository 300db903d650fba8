use serde_json::{Map, Value};

use crate::{EmbeddingVector, PipelineError};

/// Error text returned when `query` is unusable.
pub const QUERY_REQUIRED_MESSAGE: &str = "query (string) is required";

/// Error text returned when `metadata.vector` is an array of non-numbers.
pub const INVALID_VECTOR_MESSAGE: &str = "metadata.vector must be an array of numbers";

/// A validated search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// Only kept when the body's `filter` was a JSON object.
    pub filter: Option<Map<String, Value>>,
    /// Caller-supplied `metadata.vector`, which skips the embedding call.
    pub vector: Option<EmbeddingVector>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filter: None,
            vector: None,
        }
    }

    /// Parse a raw request body. Empty or non-JSON bodies behave like `{}`.
    pub fn from_slice(body: &[u8]) -> Result<Self, PipelineError> {
        let value = serde_json::from_slice(body).unwrap_or(Value::Null);
        Self::from_json(value)
    }

    /// Validate a decoded body.
    ///
    /// `query` must be a non-empty string. `filter` is silently dropped unless
    /// it is an object. `metadata.vector` is only honoured when it is an
    /// array; any other type falls back to embedding the query.
    pub fn from_json(body: Value) -> Result<Self, PipelineError> {
        let mut body = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let query = match body.remove("query") {
            Some(Value::String(q)) if !q.is_empty() => q,
            _ => return Err(PipelineError::MissingQuery),
        };

        let filter = match body.remove("filter") {
            Some(Value::Object(filter)) => Some(filter),
            _ => None,
        };

        let vector = match body.get("metadata").and_then(|m| m.get("vector")) {
            Some(Value::Array(items)) => Some(parse_vector(items)?),
            _ => None,
        };

        Ok(Self {
            query,
            filter,
            vector,
        })
    }
}

/// Index vectors are f32. Entries that do not fit (overflow to infinity) are
/// rejected here rather than being sent upstream as `null`.
fn parse_vector(items: &[Value]) -> Result<EmbeddingVector, PipelineError> {
    items
        .iter()
        .map(|item| {
            item.as_f64()
                .map(|f| f as f32)
                .filter(|f| f.is_finite())
                .ok_or(PipelineError::InvalidVector)
        })
        .collect()
}
