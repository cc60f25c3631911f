//! In-memory document store backend for fhirdoc.
//!
//! This crate provides an in-memory implementation of the `DocumentStore`
//! trait from `fhirdoc-storage`. Collections keep documents in insertion
//! order behind a `tokio::sync::RwLock`.
//!
//! # Example
//!
//! ```ignore
//! use fhirdoc_db_memory::InMemoryStore;
//! use fhirdoc_storage::{DocumentStore, Filter};
//!
//! let store = InMemoryStore::new();
//! let organizations = store.collection("Organization");
//! let doc = serde_json::json!({"_id": "42", "id": "42", "resourceType": "Organization"});
//! organizations.insert_one(doc.as_object().cloned().unwrap()).await?;
//! assert_eq!(organizations.count(&Filter::new()).await?, 1);
//! ```

mod collection;
mod stats;
mod store;

pub use collection::InMemoryCollection;
pub use stats::StoreStats;
pub use store::InMemoryStore;

pub use fhirdoc_storage::{DocumentStore, DynStore, StorageError};

/// Creates a new, empty in-memory store behind the shared trait object.
pub fn create_memory_store() -> DynStore {
    std::sync::Arc::new(InMemoryStore::new())
}
