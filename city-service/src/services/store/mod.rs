//! Document store access for city records.
//!
//! Handlers only see [`CityStore`]; the Elasticsearch client and the
//! in-memory store are interchangeable behind it.

pub mod elasticsearch;
pub mod memory;

use crate::models::{City, CityPage};
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

pub use elasticsearch::ElasticsearchStore;
pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport failure: refused connection, timeout, or a gateway error
    /// in front of the cluster.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode store response: {0}")]
    Decode(String),

    #[error("invalid store client settings: {0}")]
    Client(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => {
                tracing::error!(error = %reason, "Elasticsearch connection error");
                AppError::ServiceUnavailable("Database unavailable".to_string())
            }
            other => {
                tracing::error!(error = %other, "Elasticsearch request failed");
                AppError::DatabaseError(anyhow::Error::new(other))
            }
        }
    }
}

/// Operations the service needs from the document store.
///
/// Writes and deletes must be visible to the next read once they return.
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Human-readable target for log lines, without credentials.
    fn describe(&self) -> String;

    /// Lightweight liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn index_exists(&self) -> Result<bool, StoreError>;

    /// Create the collection with its fixed shard/replica settings.
    async fn create_index(&self) -> Result<(), StoreError>;

    /// Insert or wholesale replace the record stored under `id`.
    async fn put(&self, id: &str, city: &City) -> Result<(), StoreError>;

    async fn get(&self, id: &str) -> Result<Option<City>, StoreError>;

    /// Full-collection scan sorted by city name ascending.
    async fn search(&self, from: u64, size: u64) -> Result<CityPage, StoreError>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Release the client. Called once when the service stops.
    async fn close(&self);
}
