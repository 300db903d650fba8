use crate::{IndexError, QueryRequest, QueryResponse};
use async_trait::async_trait;

pub mod pinecone;

/// Nearest-neighbour search over a remote vector index.
///
/// Implementations must return matches in the index's rank order and must not
/// retry on failure.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Run one query and return the ranked matches.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, IndexError>;
}
