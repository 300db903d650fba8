use std::sync::Arc;

use index::{QueryRequest, VectorIndex};
use semantic::{Embedder, EmbeddingVector};

use crate::mapping::{map_matches, SearchResponse};
use crate::request::SearchRequest;
use crate::PipelineError;

/// Where the query vector of a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorSource {
    /// `metadata.vector` from the request body.
    Supplied,
    /// Computed by the embedding provider.
    Embedded,
}

impl VectorSource {
    pub fn as_str(self) -> &'static str {
        match self {
            VectorSource::Supplied => "supplied",
            VectorSource::Embedded => "embedded",
        }
    }
}

/// Embed → search → map, for one request at a time.
///
/// Holds no per-request state; one instance is shared by every handler.
#[derive(Clone)]
pub struct QueryPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    namespace: String,
    top_k: u32,
}

impl QueryPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        namespace: impl Into<String>,
        top_k: u32,
    ) -> Self {
        Self {
            embedder,
            index,
            namespace: namespace.into(),
            top_k,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    /// Use the caller's vector if one was supplied, otherwise embed the query.
    pub async fn resolve_vector(
        &self,
        request: &SearchRequest,
    ) -> Result<(EmbeddingVector, VectorSource), PipelineError> {
        match &request.vector {
            Some(vector) => Ok((vector.clone(), VectorSource::Supplied)),
            None => {
                let vector = self.embedder.embed(&request.query).await?;
                Ok((vector, VectorSource::Embedded))
            }
        }
    }

    /// Run the whole request. Any upstream failure fails the request; nothing
    /// partial is returned.
    pub async fn run(&self, request: SearchRequest) -> Result<SearchResponse, PipelineError> {
        let (vector, source) = self.resolve_vector(&request).await?;
        tracing::debug!(
            source = source.as_str(),
            dims = vector.len(),
            "query vector resolved"
        );

        let query = QueryRequest::new(&self.namespace, vector, self.top_k).with_filter(request.filter);
        let response = self.index.query(&query).await?;

        let limit = usize::try_from(self.top_k).unwrap_or(usize::MAX);
        let matches = &response.matches[..response.matches.len().min(limit)];
        let search_results = map_matches(matches);

        tracing::debug!(results = search_results.len(), "search mapped");
        Ok(SearchResponse { search_results })
    }
}

impl std::fmt::Debug for QueryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPipeline")
            .field("model", &self.embedder.model_name())
            .field("namespace", &self.namespace)
            .field("top_k", &self.top_k)
            .finish()
    }
}
