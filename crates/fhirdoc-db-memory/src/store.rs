use async_trait::async_trait;
use dashmap::DashMap;
use fhirdoc_storage::{Collection, DocumentStore, StorageResult};
use std::sync::Arc;

use crate::collection::InMemoryCollection;
use crate::stats::{StatsCounters, StoreStats};

/// In-memory document store.
///
/// Collections are created lazily by [`DocumentStore::collection`] and live
/// as long as the store. Operation counters are shared by all collections.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: DashMap<String, Arc<InMemoryCollection>>,
    stats: Arc<StatsCounters>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concrete handle to a collection, for inspection in tests and tools.
    pub fn memory_collection(&self, name: &str) -> Arc<InMemoryCollection> {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(InMemoryCollection::new(name, Arc::clone(&self.stats))))
            .clone()
    }

    /// Operation counters since creation or the last [`reset_stats`](Self::reset_stats).
    pub fn stats(&self) -> StoreStats {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn collection(&self, name: &str) -> Arc<dyn Collection> {
        self.memory_collection(name)
    }

    async fn list_collections(&self) -> StorageResult<Vec<String>> {
        // Guards must not be held across the awaits below.
        let handles: Vec<Arc<InMemoryCollection>> =
            self.collections.iter().map(|e| Arc::clone(e.value())).collect();

        let mut names = Vec::new();
        for handle in handles {
            if !handle.is_empty().await {
                names.push(handle.name().to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
