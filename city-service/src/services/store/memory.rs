use super::{CityStore, StoreError};
use crate::models::{City, CityPage};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::RwLock;

/// Process-local store with the same visible semantics as the
/// Elasticsearch index. Useful for tests and for running without a cluster.
///
/// Availability can be toggled to exercise outage handling.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    docs: RwLock<BTreeMap<String, City>>,
    index_created: AtomicBool,
    unavailable: AtomicBool,
    failing_pings: AtomicU32,
    pings: AtomicU32,
    closed: AtomicBool,
}

impl InMemoryStore {
    /// A reachable store whose index does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reachable store with the index already in place.
    pub fn with_index() -> Self {
        let store = Self::default();
        store.index_created.store(true, Ordering::SeqCst);
        store
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Make the next `count` pings fail, as a cluster still starting up would.
    pub fn fail_next_pings(&self, count: u32) {
        self.failing_pings.store(count, Ordering::SeqCst);
    }

    pub fn ping_count(&self) -> u32 {
        self.pings.load(Ordering::SeqCst)
    }

    pub fn has_index(&self) -> bool {
        self.index_created.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("in-memory store marked unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CityStore for InMemoryStore {
    fn describe(&self) -> String {
        "memory://cities".to_string()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failing_pings.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_pings.store(remaining - 1, Ordering::SeqCst);
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        self.check_available()
    }

    async fn index_exists(&self) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.has_index())
    }

    async fn create_index(&self) -> Result<(), StoreError> {
        self.check_available()?;
        self.index_created.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn put(&self, id: &str, city: &City) -> Result<(), StoreError> {
        self.check_available()?;
        self.docs.write().await.insert(id.to_string(), city.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<City>, StoreError> {
        self.check_available()?;
        Ok(self.docs.read().await.get(id).cloned())
    }

    async fn search(&self, from: u64, size: u64) -> Result<CityPage, StoreError> {
        self.check_available()?;
        let docs = self.docs.read().await;

        // Keyword sort: plain byte order on the display name.
        let mut cities: Vec<&City> = docs.values().collect();
        cities.sort_by(|a, b| a.city.cmp(&b.city));

        let from = usize::try_from(from).unwrap_or(usize::MAX);
        let size = usize::try_from(size).unwrap_or(usize::MAX);

        Ok(CityPage {
            total: docs.len() as u64,
            cities: cities.into_iter().skip(from).take(size).cloned().collect(),
        })
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.docs.write().await.remove(id).is_some())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
