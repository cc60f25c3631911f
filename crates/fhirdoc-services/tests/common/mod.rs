//! Shared fixtures for the service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use fhirdoc_db_memory::InMemoryStore;
use fhirdoc_storage::{
    Collection, Document, DocumentCursor, DocumentStore, DynStore, Filter, InsertOneResult,
    ReplaceOptions, StorageError, StorageResult,
};
use serde_json::Value;
use std::sync::Arc;

pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn memory_store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

/// Store whose collections fail every call, or only the named collection
/// when wrapping another store.
pub struct FailingStore {
    inner: Option<DynStore>,
    failing: Option<String>,
}

impl FailingStore {
    /// Every collection fails.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: None,
            failing: None,
        })
    }

    /// Only `collection` fails; the rest is served by `inner`.
    pub fn only(inner: DynStore, collection: &str) -> Arc<Self> {
        Arc::new(Self {
            inner: Some(inner),
            failing: Some(collection.to_string()),
        })
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    fn collection(&self, name: &str) -> Arc<dyn Collection> {
        match (&self.inner, &self.failing) {
            (Some(inner), Some(failing)) if failing != name => inner.collection(name),
            _ => Arc::new(FailingCollection {
                name: name.to_string(),
            }),
        }
    }

    async fn list_collections(&self) -> StorageResult<Vec<String>> {
        Err(simulated())
    }
}

struct FailingCollection {
    name: String,
}

fn simulated() -> StorageError {
    StorageError::backend(Some(91), "simulated driver failure")
}

#[async_trait]
impl Collection for FailingCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn count(&self, _filter: &Filter) -> StorageResult<u64> {
        Err(simulated())
    }

    async fn find_one(&self, _filter: &Filter) -> StorageResult<Option<Document>> {
        Err(simulated())
    }

    async fn find(&self, _filter: &Filter) -> StorageResult<DocumentCursor> {
        Err(simulated())
    }

    async fn insert_one(&self, _document: Document) -> StorageResult<InsertOneResult> {
        Err(simulated())
    }

    async fn find_one_and_replace(
        &self,
        _filter: &Filter,
        _replacement: Document,
        _options: ReplaceOptions,
    ) -> StorageResult<Option<Document>> {
        Err(simulated())
    }

    async fn delete_many(&self, _filter: &Filter) -> StorageResult<u64> {
        Err(simulated())
    }
}
