//! # Bridge Index
//!
//! Client side of the vector database the bridge queries. Nothing here owns or
//! mutates an index: the only operation is a nearest-neighbour query against
//! one namespace of an already-populated index.
//!
//! ## Core pieces
//!
//! - [`VectorIndex`]: the async seam the query pipeline talks to. Tests plug
//!   in fakes; production uses [`PineconeIndex`].
//! - [`QueryRequest`] / [`QueryResponse`]: the wire shapes of the Pinecone
//!   `/query` call. `filter` is left out of the JSON entirely when absent,
//!   because an empty filter object and a missing one are not the same thing
//!   to the server.
//! - [`IndexConfig`]: API key, host, namespace and API version.
//!
//! ## Example
//!
//! ```no_run
//! use index::{IndexConfig, PineconeIndex, QueryRequest, VectorIndex};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), index::IndexError> {
//!     let cfg = IndexConfig::new("pc-key", "my-index-abc123.svc.pinecone.io");
//!     let index = PineconeIndex::new(cfg.clone())?;
//!
//!     let request = QueryRequest::new(&cfg.namespace, vec![0.1, 0.2, 0.3], 5);
//!     let response = index.query(&request).await?;
//!     for m in response.matches {
//!         println!("{} {:?}", m.id, m.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod query;

pub use backend::pinecone::PineconeIndex;
pub use backend::VectorIndex;
pub use config::{IndexConfig, DEFAULT_API_VERSION, DEFAULT_NAMESPACE};
pub use error::IndexError;
pub use query::{QueryRequest, QueryResponse, ScoredMatch};
