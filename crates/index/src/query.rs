use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a nearest-neighbour query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub namespace: String,
    pub vector: Vec<f32>,
    pub top_k: u32,
    pub include_metadata: bool,
    /// Metadata predicate. Omitted from the JSON when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Map<String, Value>>,
}

impl QueryRequest {
    /// Query with metadata included and no filter.
    pub fn new(namespace: impl Into<String>, vector: Vec<f32>, top_k: u32) -> Self {
        Self {
            namespace: namespace.into(),
            vector,
            top_k,
            include_metadata: true,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<Map<String, Value>>) -> Self {
        self.filter = filter;
        self
    }
}

/// One neighbour, as ranked by the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub id: String,
    /// Similarity score. Higher is closer for cosine/dot-product indexes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Query result. A missing `matches` array decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<ScoredMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}
