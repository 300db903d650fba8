//! HTTP handlers.
//!
//! - `health`: liveness probe and Prometheus scrape endpoint
//! - `search`: the authenticated knowledge lookup

pub mod health;
pub mod search;

use crate::error::ServerError;

/// Fallback for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
