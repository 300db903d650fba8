//! Workspace umbrella crate for knowledge-bridge.
//!
//! This crate stitches the embedding client and the vector index client into
//! the one operation the service exists for: take a search request, resolve a
//! query vector, ask the index for neighbours, and reshape the matches into
//! the `search_results` schema the orchestration platform consumes.
//!
//! ```no_run
//! use std::sync::Arc;
//! use bridge::{QueryPipeline, SearchRequest};
//! use index::{IndexConfig, PineconeIndex};
//! use semantic::{OpenAiEmbedder, SemanticConfig};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = QueryPipeline::new(
//!     Arc::new(OpenAiEmbedder::new(SemanticConfig::new("sk-..."))?),
//!     Arc::new(PineconeIndex::new(IndexConfig::new("pc-...", "idx.svc.pinecone.io"))?),
//!     "__default__",
//!     5,
//! );
//! let request = SearchRequest::from_json(json!({ "query": "reset my password" }))?;
//! let response = pipeline.run(request).await?;
//! println!("{}", serde_json::to_string(&response)?);
//! # Ok(())
//! # }
//! ```

pub mod mapping;
pub mod pipeline;
pub mod request;

pub use index::{IndexError, QueryRequest, QueryResponse, ScoredMatch, VectorIndex};
pub use mapping::{map_match, map_matches, ResultMetadata, SearchResponse, SearchResult};
pub use pipeline::{QueryPipeline, VectorSource};
pub use request::{SearchRequest, INVALID_VECTOR_MESSAGE, QUERY_REQUIRED_MESSAGE};
pub use semantic::{Embedder, EmbeddingVector, SemanticError};

use thiserror::Error;

/// Errors that can occur while serving one search request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    /// `query` was missing, empty, or not a string.
    #[error("{}", QUERY_REQUIRED_MESSAGE)]
    MissingQuery,
    /// `metadata.vector` was an array but held something other than numbers.
    #[error("{}", INVALID_VECTOR_MESSAGE)]
    InvalidVector,
    #[error(transparent)]
    Embedding(#[from] SemanticError),
    #[error(transparent)]
    Search(#[from] IndexError),
}

impl PipelineError {
    /// True for failures caused by the caller's input rather than an upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::MissingQuery | PipelineError::InvalidVector)
    }
}
