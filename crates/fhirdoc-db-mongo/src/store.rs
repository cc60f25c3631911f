use async_trait::async_trait;
use fhirdoc_storage::{
    Collection, Document, DocumentCursor, DocumentStore, Filter, InsertOneResult, ReplaceOptions,
    StorageError, StorageResult,
};
use futures_util::StreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Database, bson};
use std::sync::Arc;
use tracing::debug;

use crate::convert::{filter_to_bson, from_bson_document, key_to_json, to_bson_document};
use crate::error::map_driver_error;

/// Document store backed by one MongoDB database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connects to `uri` and uses `database`.
    pub async fn connect(uri: &str, database: &str) -> StorageResult<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StorageError::connection_error(e.to_string()))?;
        debug!(database, "connected to mongodb");
        Ok(Self::from_database(client.database(database)))
    }

    pub fn from_database(database: Database) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    fn collection(&self, name: &str) -> Arc<dyn Collection> {
        Arc::new(MongoCollection {
            name: name.to_string(),
            inner: self.database.collection::<bson::Document>(name),
        })
    }

    async fn list_collections(&self) -> StorageResult<Vec<String>> {
        let mut names = self
            .database
            .list_collection_names()
            .await
            .map_err(|e| map_driver_error(self.database.name(), e))?;
        names.sort();
        Ok(names)
    }
}

/// One MongoDB collection.
#[derive(Clone, Debug)]
pub struct MongoCollection {
    name: String,
    inner: mongodb::Collection<bson::Document>,
}

#[async_trait]
impl Collection for MongoCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn count(&self, filter: &Filter) -> StorageResult<u64> {
        self.inner
            .count_documents(filter_to_bson(filter)?)
            .await
            .map_err(|e| map_driver_error(&self.name, e))
    }

    async fn find_one(&self, filter: &Filter) -> StorageResult<Option<Document>> {
        let found = self
            .inner
            .find_one(filter_to_bson(filter)?)
            .await
            .map_err(|e| map_driver_error(&self.name, e))?;
        found.map(from_bson_document).transpose()
    }

    async fn find(&self, filter: &Filter) -> StorageResult<DocumentCursor> {
        let cursor = self
            .inner
            .find(filter_to_bson(filter)?)
            .await
            .map_err(|e| map_driver_error(&self.name, e))?;

        let name = self.name.clone();
        let documents = cursor.map(move |item| {
            item.map_err(|e| map_driver_error(&name, e))
                .and_then(from_bson_document)
        });
        Ok(DocumentCursor::new(documents.boxed()))
    }

    async fn insert_one(&self, document: Document) -> StorageResult<InsertOneResult> {
        let result = self
            .inner
            .insert_one(to_bson_document(&document)?)
            .await
            .map_err(|e| map_driver_error(&self.name, e))?;
        Ok(InsertOneResult {
            inserted_id: key_to_json(result.inserted_id),
        })
    }

    async fn find_one_and_replace(
        &self,
        filter: &Filter,
        replacement: Document,
        options: ReplaceOptions,
    ) -> StorageResult<Option<Document>> {
        let previous = self
            .inner
            .find_one_and_replace(filter_to_bson(filter)?, to_bson_document(&replacement)?)
            .upsert(options.upsert)
            .return_document(ReturnDocument::Before)
            .await
            .map_err(|e| map_driver_error(&self.name, e))?;
        previous.map(from_bson_document).transpose()
    }

    async fn delete_many(&self, filter: &Filter) -> StorageResult<u64> {
        let result = self
            .inner
            .delete_many(filter_to_bson(filter)?)
            .await
            .map_err(|e| map_driver_error(&self.name, e))?;
        Ok(result.deleted_count)
    }
}
