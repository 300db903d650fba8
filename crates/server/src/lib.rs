//! knowledge-bridge server: the HTTP front door of the bridge.
//!
//! Exposes a single resource at `/`:
//!
//! - `GET /` - liveness probe, always `{"ok": true}`, never authenticated
//! - `POST /` - knowledge search; embeds the query (unless a vector is
//!   supplied), queries the vector index and returns `search_results`
//!
//! When `KNOWLEDGE_API_KEY` is set, `POST /` requires that secret in
//! `x-api-key`, `api-key`, or `Authorization: Bearer|ApiKey <token>`.
//! `GET /metrics` serves Prometheus metrics when `METRICS_ENABLED=true`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     server::telemetry::init_tracing();
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::{ConfigError, ServerConfig};
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
