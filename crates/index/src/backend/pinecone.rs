//! Pinecone data-plane client.

use async_trait::async_trait;

use super::VectorIndex;
use crate::{IndexConfig, IndexError, QueryRequest, QueryResponse};

/// [`VectorIndex`] that calls `POST {host}/query` on a hosted Pinecone index.
#[derive(Debug, Clone)]
pub struct PineconeIndex {
    client: reqwest::Client,
    query_url: String,
    cfg: IndexConfig,
}

impl PineconeIndex {
    pub fn new(cfg: IndexConfig) -> Result<Self, IndexError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| IndexError::InvalidConfig(format!("http client: {e}")))?;
        Self::with_client(cfg, client)
    }

    pub fn with_client(cfg: IndexConfig, client: reqwest::Client) -> Result<Self, IndexError> {
        if cfg.api_key.trim().is_empty() {
            return Err(IndexError::InvalidConfig("api_key is empty".into()));
        }
        if cfg.host.trim().is_empty() {
            return Err(IndexError::InvalidConfig("host is empty".into()));
        }
        Ok(Self {
            client,
            query_url: cfg.query_url(),
            cfg,
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.cfg
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, IndexError> {
        let response = self
            .client
            .post(&self.query_url)
            .header("Api-Key", &self.cfg.api_key)
            .header("X-Pinecone-API-Version", &self.cfg.api_version)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IndexError::Status { status, body });
        }

        let parsed = response
            .json::<QueryResponse>()
            .await
            .map_err(|e| IndexError::Decode(e.to_string()))?;

        tracing::debug!(
            index = self.cfg.index_name.as_deref().unwrap_or("-"),
            namespace = %request.namespace,
            matches = parsed.matches.len(),
            "vector query complete"
        );
        Ok(parsed)
    }
}
