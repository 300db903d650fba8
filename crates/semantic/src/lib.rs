//! Query embedding for knowledge-bridge.
//!
//! The bridge only ever embeds one thing per request: the caller's search
//! query. This crate owns that single call.
//!
//! - [`Embedder`] is the seam the query pipeline depends on, so tests can swap
//!   in a fake that counts calls.
//! - [`OpenAiEmbedder`] talks to an OpenAI-compatible `/embeddings` endpoint.
//!
//! There are no retries and no timeouts beyond the HTTP client's defaults. A
//! failed call fails the request that made it.
//!
//! ## Quick example
//!
//! ```no_run
//! use semantic::{Embedder, OpenAiEmbedder, SemanticConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let embedder = OpenAiEmbedder::new(SemanticConfig::new("sk-..."))?;
//!     let vector = embedder.embed("how do I rotate my keys?").await?;
//!     println!("{} dims", vector.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod types;

mod api;

pub use api::{build_payload, parse_embeddings, OpenAiEmbedder};
pub use config::{SemanticConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use error::SemanticError;
pub use types::EmbeddingVector;

use async_trait::async_trait;

/// Turns query text into a vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text and return the first embedding the provider produced.
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, SemanticError>;

    /// Model identifier sent to the provider.
    fn model_name(&self) -> &str;
}
