use index::IndexConfig;
use semantic::SemanticConfig;
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Optional config file (`knowledge-bridge.toml`, `.yaml`, `.json`, ...)
/// looked up in the working directory. Environment variables override it.
pub const CONFIG_FILE: &str = "knowledge-bridge";

/// Startup configuration errors. Any of these aborts the process before the
/// listener is bound.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Shape of the raw sources. Keys are the lower-cased environment variable
/// names.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_bind_addr")]
    bind_addr: String,
    #[serde(default = "default_port")]
    port: u16,
    pinecone_api_key: Option<String>,
    index_host: Option<String>,
    index_name: Option<String>,
    #[serde(default = "default_namespace")]
    namespace: String,
    openai_api_key: Option<String>,
    #[serde(default = "default_embed_model")]
    embed_model: String,
    #[serde(default = "default_openai_base_url")]
    openai_base_url: String,
    #[serde(default = "default_pinecone_api_version")]
    pinecone_api_version: String,
    #[serde(default = "default_top_k")]
    top_k: i64,
    knowledge_api_key: Option<String>,
    #[serde(default = "default_max_body_size_kb")]
    max_body_size_kb: usize,
    #[serde(default)]
    metrics_enabled: bool,
}

/// Validated server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Interface to bind (`BIND_ADDR`)
    pub bind_addr: IpAddr,
    /// Listening port (`PORT`)
    pub port: u16,
    pub pinecone_api_key: String,
    /// Index data-plane host (`INDEX_HOST`)
    pub index_host: String,
    /// Index name (`INDEX_NAME`), informational only
    pub index_name: Option<String>,
    pub namespace: String,
    pub openai_api_key: String,
    pub embed_model: String,
    pub openai_base_url: String,
    pub pinecone_api_version: String,
    /// Matches requested per query (`TOP_K`)
    pub top_k: u32,
    /// Shared secret gating `POST /`. `None` disables auth.
    pub knowledge_api_key: Option<String>,
    /// Maximum request body size in KiB
    pub max_body_size_kb: usize,
    /// Serve Prometheus metrics on `/metrics`
    pub metrics_enabled: bool,
}

impl ServerConfig {
    /// Load configuration from the optional config file and the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let raw: RawConfig = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::default().ignore_empty(true))
            .build()?
            .try_deserialize()?;
        raw.validate()
    }

    /// Build from an explicit set of variables instead of the process
    /// environment. Names are the same as the environment variables.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let raw: RawConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .ignore_empty(true)
                    .source(Some(source)),
            )
            .build()?
            .try_deserialize()?;
        raw.validate()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb.saturating_mul(1024)
    }

    /// The shared secret, if auth is enabled.
    pub fn auth_secret(&self) -> Option<&str> {
        self.knowledge_api_key.as_deref()
    }

    pub fn semantic_config(&self) -> SemanticConfig {
        SemanticConfig::new(self.openai_api_key.clone())
            .with_model(self.embed_model.clone())
            .with_api_base(self.openai_base_url.clone())
    }

    pub fn index_config(&self) -> IndexConfig {
        let cfg = IndexConfig::new(self.pinecone_api_key.clone(), self.index_host.clone())
            .with_namespace(self.namespace.clone())
            .with_api_version(self.pinecone_api_version.clone());
        match &self.index_name {
            Some(name) => cfg.with_index_name(name.clone()),
            None => cfg,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("index_host", &self.index_host)
            .field("index_name", &self.index_name)
            .field("namespace", &self.namespace)
            .field("embed_model", &self.embed_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("top_k", &self.top_k)
            .field("auth_enabled", &self.knowledge_api_key.is_some())
            .field("max_body_size_kb", &self.max_body_size_kb)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish_non_exhaustive()
    }
}

impl RawConfig {
    fn validate(self) -> Result<ServerConfig, ConfigError> {
        let mut missing = Vec::new();
        let pinecone_api_key = required(self.pinecone_api_key, "PINECONE_API_KEY", &mut missing);
        let index_host = required(self.index_host, "INDEX_HOST", &mut missing);
        let openai_api_key = required(self.openai_api_key, "OPENAI_API_KEY", &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing));
        }

        let bind_addr = self.bind_addr.trim().parse::<IpAddr>().map_err(|e| {
            ConfigError::Invalid(format!("BIND_ADDR `{}`: {e}", self.bind_addr))
        })?;

        let top_k = u32::try_from(self.top_k)
            .ok()
            .filter(|k| *k >= 1)
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "TOP_K must be a positive integer, got {}",
                    self.top_k
                ))
            })?;

        if self.max_body_size_kb == 0 {
            return Err(ConfigError::Invalid(
                "MAX_BODY_SIZE_KB must be greater than zero".into(),
            ));
        }
        if self.max_body_size_kb.checked_mul(1024).is_none() {
            return Err(ConfigError::Invalid(format!(
                "MAX_BODY_SIZE_KB {} overflows a byte count",
                self.max_body_size_kb
            )));
        }

        Ok(ServerConfig {
            bind_addr,
            port: self.port,
            pinecone_api_key,
            index_host,
            index_name: non_blank(self.index_name),
            namespace: self.namespace,
            openai_api_key,
            embed_model: self.embed_model,
            openai_base_url: self.openai_base_url,
            pinecone_api_version: self.pinecone_api_version,
            top_k,
            knowledge_api_key: non_blank(self.knowledge_api_key),
            max_body_size_kb: self.max_body_size_kb,
            metrics_enabled: self.metrics_enabled,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match non_blank(value) {
        Some(v) => v,
        None => {
            missing.push(name);
            String::new()
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_namespace() -> String {
    index::DEFAULT_NAMESPACE.to_string()
}

fn default_embed_model() -> String {
    semantic::DEFAULT_MODEL.to_string()
}

fn default_openai_base_url() -> String {
    semantic::DEFAULT_API_BASE.to_string()
}

fn default_pinecone_api_version() -> String {
    index::DEFAULT_API_VERSION.to_string()
}

fn default_top_k() -> i64 {
    5
}

fn default_max_body_size_kb() -> usize {
    1024
}
