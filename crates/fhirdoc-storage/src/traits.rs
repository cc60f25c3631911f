//! Storage traits for the document store abstraction.
//!
//! Backends expose named collections of JSON documents. Every document
//! carries a primary key under `_id`; a backend generates one on insert when
//! the document has none.

use async_trait::async_trait;
use std::sync::Arc;

use crate::filter::Filter;
use crate::types::{DocumentCursor, InsertOneResult, ReplaceOptions};
use crate::{Document, StorageResult};

/// A database holding named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend identifier for logs ("memory", "mongodb").
    fn backend_name(&self) -> &'static str;

    /// Handle to a collection. Collections are created on first write.
    fn collection(&self, name: &str) -> Arc<dyn Collection>;

    /// Names of the collections holding at least one document.
    async fn list_collections(&self) -> StorageResult<Vec<String>>;
}

/// One collection of documents.
#[async_trait]
pub trait Collection: Send + Sync {
    fn name(&self) -> &str;

    /// Number of documents matching `filter`.
    async fn count(&self, filter: &Filter) -> StorageResult<u64>;

    /// First matching document in natural order.
    async fn find_one(&self, filter: &Filter) -> StorageResult<Option<Document>>;

    /// All matching documents in natural order.
    async fn find(&self, filter: &Filter) -> StorageResult<DocumentCursor>;

    /// Inserts a document, generating `_id` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DuplicateKey` if `_id` is already taken.
    async fn insert_one(&self, document: Document) -> StorageResult<InsertOneResult>;

    /// Replaces the first matching document and returns it as it was
    /// before the replacement.
    ///
    /// With `upsert`, a replacement that matches nothing is inserted and
    /// `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ImmutableField` if the replacement carries an
    /// `_id` different from the matched document's.
    async fn find_one_and_replace(
        &self,
        filter: &Filter,
        replacement: Document,
        options: ReplaceOptions,
    ) -> StorageResult<Option<Document>>;

    /// Deletes every matching document and returns how many were removed.
    async fn delete_many(&self, filter: &Filter) -> StorageResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test that DocumentStore is object-safe
    fn _assert_store_object_safe(_: &dyn DocumentStore) {}

    // Compile-time test that Collection is object-safe
    fn _assert_collection_object_safe(_: &dyn Collection) {}

    fn _assert_send_sync<T: Send + Sync + ?Sized>() {}

    #[test]
    fn test_trait_objects_are_send_sync() {
        _assert_send_sync::<dyn DocumentStore>();
        _assert_send_sync::<dyn Collection>();
    }
}
