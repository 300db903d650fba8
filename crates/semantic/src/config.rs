use serde::{Deserialize, Serialize};

/// Embedding model used when `EMBED_MODEL` is not set. 1536 dimensions.
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Base URL of the OpenAI REST API.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Settings for the embedding provider.
///
/// # Example
/// ```
/// use semantic::SemanticConfig;
///
/// let cfg = SemanticConfig::new("sk-test").with_model("text-embedding-3-large");
/// assert_eq!(cfg.endpoint(), "https://api.openai.com/v1/embeddings");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticConfig {
    /// Bearer token for the provider.
    pub api_key: String,
    /// Model name forwarded verbatim in the request body.
    pub model_name: String,
    /// API root; `/embeddings` is appended.
    pub api_base: String,
}

impl SemanticConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_name: DEFAULT_MODEL.into(),
            api_base: DEFAULT_API_BASE.into(),
        }
    }

    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Full URL of the embeddings endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/embeddings", self.api_base.trim_end_matches('/'))
    }
}
