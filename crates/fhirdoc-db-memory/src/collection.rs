use async_trait::async_trait;
use fhirdoc_storage::{
    Collection, Condition, Document, DocumentCursor, Filter, InsertOneResult, ReplaceOptions,
    STORAGE_KEY, StorageError, StorageResult,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::stats::StatsCounters;

/// One in-memory collection. Documents are kept in insertion order.
#[derive(Debug)]
pub struct InMemoryCollection {
    name: String,
    documents: RwLock<Vec<Document>>,
    stats: Arc<StatsCounters>,
}

impl InMemoryCollection {
    pub(crate) fn new(name: impl Into<String>, stats: Arc<StatsCounters>) -> Self {
        Self {
            name: name.into(),
            documents: RwLock::new(Vec::new()),
            stats,
        }
    }

    /// Number of stored documents, without touching the operation counters.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Copy of every stored document, without touching the operation counters.
    pub async fn snapshot(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }

    fn ensure_unique_key(&self, documents: &[Document], key: &Value) -> StorageResult<()> {
        if documents.iter().any(|d| d.get(STORAGE_KEY) == Some(key)) {
            return Err(StorageError::duplicate_key(&self.name, key.to_string()));
        }
        Ok(())
    }
}

/// 24 hex characters, the width of a document database object id.
pub(crate) fn generate_key() -> Value {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    Value::String(hex[..24].to_string())
}

fn position_of(documents: &[Document], filter: &Filter) -> StorageResult<Option<usize>> {
    for (index, document) in documents.iter().enumerate() {
        if filter.matches(document)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

#[async_trait]
impl Collection for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn count(&self, filter: &Filter) -> StorageResult<u64> {
        self.stats.record_read();
        let documents = self.documents.read().await;
        let mut count = 0u64;
        for document in documents.iter() {
            if filter.matches(document)? {
                count += 1;
            }
        }
        Ok(count)
    }

    async fn find_one(&self, filter: &Filter) -> StorageResult<Option<Document>> {
        self.stats.record_read();
        let documents = self.documents.read().await;
        Ok(position_of(&documents, filter)?.map(|i| documents[i].clone()))
    }

    async fn find(&self, filter: &Filter) -> StorageResult<DocumentCursor> {
        self.stats.record_read();
        let documents = self.documents.read().await;
        let mut matched = Vec::new();
        for document in documents.iter() {
            if filter.matches(document)? {
                matched.push(document.clone());
            }
        }
        Ok(DocumentCursor::from_documents(matched))
    }

    async fn insert_one(&self, mut document: Document) -> StorageResult<InsertOneResult> {
        self.stats.record_write();
        let mut documents = self.documents.write().await;

        let key = match document.get(STORAGE_KEY) {
            Some(Value::Null) | None => {
                let key = generate_key();
                document.insert(STORAGE_KEY.to_string(), key.clone());
                key
            }
            Some(key) => key.clone(),
        };
        self.ensure_unique_key(&documents, &key)?;

        documents.push(document);
        Ok(InsertOneResult { inserted_id: key })
    }

    async fn find_one_and_replace(
        &self,
        filter: &Filter,
        mut replacement: Document,
        options: ReplaceOptions,
    ) -> StorageResult<Option<Document>> {
        self.stats.record_write();
        let mut documents = self.documents.write().await;

        if let Some(index) = position_of(&documents, filter)? {
            let existing_key = documents[index].get(STORAGE_KEY).cloned();
            let new_key = replacement.get(STORAGE_KEY).cloned();
            match (new_key, existing_key) {
                (Some(new_key), Some(old_key)) if new_key != old_key => {
                    return Err(StorageError::immutable_field(&self.name, STORAGE_KEY));
                }
                (None, Some(old_key)) => {
                    replacement.insert(STORAGE_KEY.to_string(), old_key);
                }
                _ => {}
            }
            let previous = std::mem::replace(&mut documents[index], replacement);
            return Ok(Some(previous));
        }

        if !options.upsert {
            return Ok(None);
        }

        let key = match replacement.get(STORAGE_KEY) {
            Some(key) => key.clone(),
            None => {
                let key = match filter.get(STORAGE_KEY) {
                    Some(Condition::Equals(value)) if !value.is_null() => value.clone(),
                    _ => generate_key(),
                };
                replacement.insert(STORAGE_KEY.to_string(), key.clone());
                key
            }
        };
        self.ensure_unique_key(&documents, &key)?;
        documents.push(replacement);
        Ok(None)
    }

    async fn delete_many(&self, filter: &Filter) -> StorageResult<u64> {
        self.stats.record_write();
        let mut documents = self.documents.write().await;

        let mut keep = Vec::with_capacity(documents.len());
        for document in documents.iter() {
            keep.push(!filter.matches(document)?);
        }
        let before = documents.len();
        let mut flags = keep.into_iter();
        documents.retain(|_| flags.next().unwrap_or(true));
        Ok((before - documents.len()) as u64)
    }
}
