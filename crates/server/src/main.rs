//! knowledge-bridge binary.
//!
//! Loads `.env` if present, configures JSON logging, validates configuration
//! and serves until shutdown. Missing required settings are fatal.

use server::{ConfigError, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    server::telemetry::init_tracing();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(ConfigError::MissingEnv(names)) => {
            tracing::error!(missing = ?names, "Missing required environment variables");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    server::start_server(config).await
}
