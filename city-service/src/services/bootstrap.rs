//! Startup connection to the document store.
//!
//! The cluster usually comes up alongside the service, so the first probes
//! are expected to fail. The bootstrapper keeps probing on a fixed delay
//! until the store answers or the attempt ceiling is reached, then makes
//! sure the index exists.

use crate::config::ElasticsearchConfig;
use crate::services::store::{CityStore, ElasticsearchStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(
        "Cannot reach Elasticsearch at {target} after {attempts} attempts \
         (scheme={scheme}, tls_verify={verify_certs}, credentials_supplied={credentials_supplied}): {last_error}"
    )]
    Unreachable {
        target: String,
        scheme: String,
        attempts: u32,
        verify_certs: bool,
        credentials_supplied: bool,
        last_error: String,
    },

    #[error("Failed to prepare index '{index}': {source}")]
    Index {
        index: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to build Elasticsearch client: {0}")]
    Client(#[source] StoreError),
}

/// Where the reachability loop currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeState {
    Probing { attempt: u32 },
    Ready { attempts: u32 },
    Failed { attempts: u32, last_error: String },
}

/// Outcome of the index check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    Existing,
    Created,
}

pub struct Bootstrapper<'a> {
    store: &'a dyn CityStore,
    config: &'a ElasticsearchConfig,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(store: &'a dyn CityStore, config: &'a ElasticsearchConfig) -> Self {
        Self { store, config }
    }

    fn max_attempts(&self) -> u32 {
        self.config.startup.max_attempts.max(1)
    }

    fn retry_delay(&self) -> Duration {
        self.config.startup.retry_delay
    }

    /// Advance the probe loop by one state. Only `Probing` does any work.
    pub async fn step(&self, state: ProbeState) -> ProbeState {
        let ProbeState::Probing { attempt } = state else {
            return state;
        };

        match self.store.ping().await {
            Ok(()) => ProbeState::Ready { attempts: attempt },
            Err(e) if attempt >= self.max_attempts() => ProbeState::Failed {
                attempts: attempt,
                last_error: e.to_string(),
            },
            Err(e) => {
                tracing::info!(
                    attempt,
                    max_attempts = self.max_attempts(),
                    retry_in_secs = self.retry_delay().as_secs(),
                    error = %e,
                    "Elasticsearch not reachable yet"
                );
                tokio::time::sleep(self.retry_delay()).await;
                ProbeState::Probing {
                    attempt: attempt + 1,
                }
            }
        }
    }

    /// Probe until the store answers or the attempt ceiling is hit.
    pub async fn wait_until_ready(&self) -> Result<u32, BootstrapError> {
        let mut state = ProbeState::Probing { attempt: 1 };
        loop {
            state = match self.step(state).await {
                ProbeState::Ready { attempts } => {
                    tracing::info!(attempts, "Elasticsearch is reachable");
                    return Ok(attempts);
                }
                ProbeState::Failed {
                    attempts,
                    last_error,
                } => {
                    return Err(BootstrapError::Unreachable {
                        target: self.config.base_url(),
                        scheme: self.config.scheme.to_string(),
                        attempts,
                        verify_certs: self.config.verify_certs,
                        credentials_supplied: self.config.credentials_supplied(),
                        last_error,
                    });
                }
                probing => probing,
            };
        }
    }

    /// Create the index when it is missing.
    pub async fn ensure_index(&self) -> Result<IndexStatus, BootstrapError> {
        let index_error = |source| BootstrapError::Index {
            index: self.config.index.clone(),
            source,
        };

        if self.store.index_exists().await.map_err(index_error)? {
            tracing::info!(index = %self.config.index, "Index already exists");
            return Ok(IndexStatus::Existing);
        }

        self.store.create_index().await.map_err(index_error)?;
        tracing::info!(index = %self.config.index, "Created index");
        Ok(IndexStatus::Created)
    }

    pub async fn run(&self) -> Result<IndexStatus, BootstrapError> {
        self.wait_until_ready().await?;
        self.ensure_index().await
    }
}

/// Build the Elasticsearch client and block until it is usable.
pub async fn connect(config: &ElasticsearchConfig) -> Result<Arc<dyn CityStore>, BootstrapError> {
    tracing::info!(
        target_url = %config.base_url(),
        index = %config.index,
        tls_verify = config.verify_certs,
        credentials_supplied = config.credentials_supplied(),
        "Connecting to Elasticsearch"
    );

    let store = ElasticsearchStore::new(config).map_err(BootstrapError::Client)?;
    Bootstrapper::new(&store, config).run().await?;

    tracing::info!(target_url = %config.base_url(), "Elasticsearch connection established");
    Ok(Arc::new(store))
}
