use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{Embedder, EmbeddingVector, SemanticConfig, SemanticError};

/// [`Embedder`] backed by an OpenAI-compatible `/embeddings` endpoint.
///
/// The `reqwest::Client` is built once here and reused for every call, so
/// connection pooling is per embedder instance rather than process-global.
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    endpoint: String,
    cfg: SemanticConfig,
}

impl OpenAiEmbedder {
    pub fn new(cfg: SemanticConfig) -> Result<Self, SemanticError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SemanticError::InvalidConfig(format!("http client: {e}")))?;
        Self::with_client(cfg, client)
    }

    /// Build with a caller-supplied client.
    pub fn with_client(cfg: SemanticConfig, client: reqwest::Client) -> Result<Self, SemanticError> {
        if cfg.api_key.trim().is_empty() {
            return Err(SemanticError::InvalidConfig("api_key is empty".into()));
        }
        if cfg.model_name.trim().is_empty() {
            return Err(SemanticError::InvalidConfig("model_name is empty".into()));
        }
        Ok(Self {
            client,
            endpoint: cfg.endpoint(),
            cfg,
        })
    }

    async fn send(&self, payload: Value) -> Result<Value, SemanticError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.cfg.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SemanticError::Status { status, body });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SemanticError::InvalidResponse(format!("invalid JSON: {e}")))
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, SemanticError> {
        let payload = build_payload(&self.cfg.model_name, text);
        let response = self.send(payload).await?;

        let vector = parse_embeddings(response)?
            .into_iter()
            .next()
            .ok_or(SemanticError::EmptyResponse)?;

        tracing::debug!(
            model = %self.cfg.model_name,
            dims = vector.len(),
            "query embedded"
        );
        Ok(vector)
    }

    fn model_name(&self) -> &str {
        &self.cfg.model_name
    }
}

/// Request body for a single-input embeddings call.
pub fn build_payload(model: &str, text: &str) -> Value {
    json!({ "model": model, "input": text })
}

/// Body of an OpenAI `/embeddings` response. Only the fields the bridge
/// reads are declared.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: EmbeddingVector,
}

/// Pull every embedding out of an OpenAI response
/// (`{"data": [{"embedding": [...]}, ...]}`), in response order.
pub fn parse_embeddings(value: Value) -> Result<Vec<EmbeddingVector>, SemanticError> {
    let response: EmbeddingsResponse = serde_json::from_value(value).map_err(|e| {
        SemanticError::InvalidResponse(format!("unexpected embeddings shape: {e}"))
    })?;
    Ok(response.data.into_iter().map(|item| item.embedding).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_openai_single_input() {
        let payload = build_payload("text-embedding-3-small", "hello");
        assert_eq!(
            payload,
            json!({ "model": "text-embedding-3-small", "input": "hello" })
        );
    }

    #[test]
    fn parses_openai_data_shape_in_order() {
        let response = json!({
            "object": "list",
            "data": [
                { "object": "embedding", "index": 0, "embedding": [0.5, -0.25] },
                { "object": "embedding", "index": 1, "embedding": [1.0, 2.0] }
            ],
            "model": "text-embedding-3-small"
        });
        let vectors = parse_embeddings(response).unwrap();
        assert_eq!(vectors, vec![vec![0.5, -0.25], vec![1.0, 2.0]]);
    }

    #[test]
    fn empty_data_yields_no_vectors() {
        assert!(parse_embeddings(json!({ "data": [] })).unwrap().is_empty());
    }

    #[test]
    fn rejects_missing_embedding_field() {
        let err = parse_embeddings(json!({ "data": [{ "index": 0 }] })).unwrap_err();
        assert!(matches!(err, SemanticError::InvalidResponse(_)));
    }

    #[test]
    fn rejects_non_numeric_entries() {
        let err = parse_embeddings(json!({ "data": [{ "embedding": [0.1, "x"] }] })).unwrap_err();
        assert!(matches!(err, SemanticError::InvalidResponse(_)));
    }

    #[test]
    fn rejects_other_provider_shapes() {
        for value in [json!({ "embeddings": [[0.1, 0.2]] }), json!([0.1, 0.2])] {
            let err = parse_embeddings(value).unwrap_err();
            assert!(matches!(err, SemanticError::InvalidResponse(_)));
        }
    }

    #[test]
    fn rejects_unknown_object_shape() {
        let err = parse_embeddings(json!({ "error": { "message": "nope" } })).unwrap_err();
        assert!(err.to_string().contains("unexpected embeddings shape"));
    }

    #[test]
    fn empty_api_key_is_rejected_at_construction() {
        let err = OpenAiEmbedder::new(SemanticConfig::new("  ")).unwrap_err();
        assert!(matches!(err, SemanticError::InvalidConfig(_)));
    }

    #[test]
    fn embedder_reports_model_name() {
        let embedder =
            OpenAiEmbedder::new(SemanticConfig::new("sk-test").with_model("custom-model")).unwrap();
        assert_eq!(embedder.model_name(), "custom-model");
    }
}
