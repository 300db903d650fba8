use serde::{Deserialize, Serialize};

/// Namespace queried when `NAMESPACE` is not set.
pub const DEFAULT_NAMESPACE: &str = "__default__";

/// Value sent in the `X-Pinecone-API-Version` header.
pub const DEFAULT_API_VERSION: &str = "2025-04";

/// Connection settings for one hosted index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexConfig {
    /// Sent as the `Api-Key` header.
    pub api_key: String,
    /// Index host, with or without scheme (`my-index.svc.pinecone.io`).
    pub host: String,
    /// Human-readable index name. Only used for logging; the host already
    /// identifies the index on the data plane.
    pub index_name: Option<String>,
    /// Namespace every query is scoped to.
    pub namespace: String,
    pub api_version: String,
}

impl IndexConfig {
    pub fn new(api_key: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host: host.into(),
            index_name: None,
            namespace: DEFAULT_NAMESPACE.into(),
            api_version: DEFAULT_API_VERSION.into(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Base URL of the data plane. Bare hosts get `https://`; a trailing
    /// slash is dropped.
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }

    pub fn query_url(&self) -> String {
        format!("{}/query", self.base_url())
    }
}
