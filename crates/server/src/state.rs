use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use bridge::QueryPipeline;
use index::PineconeIndex;
use metrics_exporter_prometheus::PrometheusHandle;
use semantic::OpenAiEmbedder;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Shared application state. Built once at startup; read-only afterwards.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Embed → search → map pipeline (shared across requests)
    pub pipeline: QueryPipeline,

    /// Prometheus handle, present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create state with the real embedding and vector-index clients.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let embedder = OpenAiEmbedder::new(config.semantic_config())
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        let index = PineconeIndex::new(config.index_config())
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        let pipeline = QueryPipeline::new(
            Arc::new(embedder),
            Arc::new(index),
            config.namespace.clone(),
            config.top_k,
        );
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Create state around an existing pipeline (e.g. one built from fakes).
    pub fn with_pipeline(config: ServerConfig, pipeline: QueryPipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn auth_enabled(&self) -> bool {
        self.config.auth_secret().is_some()
    }

    /// Check a presented token against the shared secret. Both sides are
    /// trimmed; comparison is exact and constant-time.
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        match self.config.auth_secret() {
            Some(secret) => secret.trim().as_bytes().ct_eq(key.trim().as_bytes()).into(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(secret: Option<&str>) -> ServerState {
        let mut vars = vec![
            ("PINECONE_API_KEY", "pc"),
            ("INDEX_HOST", "idx.svc.pinecone.io"),
            ("OPENAI_API_KEY", "sk"),
        ];
        if let Some(secret) = secret {
            vars.push(("KNOWLEDGE_API_KEY", secret));
        }
        ServerState::new(ServerConfig::from_vars(vars).unwrap()).unwrap()
    }

    #[test]
    fn test_key_comparison_is_exact_after_trim() {
        let state = state(Some("s3cret"));
        assert!(state.auth_enabled());
        assert!(state.is_valid_api_key("s3cret"));
        assert!(state.is_valid_api_key("  s3cret\t"));
        assert!(!state.is_valid_api_key("S3CRET"));
        assert!(!state.is_valid_api_key("s3cret-extra"));
        assert!(!state.is_valid_api_key(""));
    }

    #[test]
    fn test_no_secret_means_open() {
        let state = state(None);
        assert!(!state.auth_enabled());
        assert!(state.is_valid_api_key("anything"));
    }

    #[test]
    fn test_pipeline_uses_configured_scope() {
        let state = state(None);
        assert_eq!(state.pipeline.namespace(), "__default__");
        assert_eq!(state.pipeline.top_k(), 5);
    }
}
