//! JSON <-> BSON conversion and filter translation.

use fhirdoc_storage::{Condition, Document, Filter, STORAGE_KEY, StorageError, StorageResult};
use mongodb::bson::{self, Bson, Regex};
use serde_json::Value;

/// Query document equivalent to `filter`.
pub fn filter_to_bson(filter: &Filter) -> StorageResult<bson::Document> {
    let mut query = bson::Document::new();
    for (path, condition) in filter.iter() {
        let value = match condition {
            Condition::Equals(value) => json_to_bson(value)?,
            Condition::NumberEquals(n) => Bson::Double(*n),
            Condition::Regex {
                pattern,
                case_insensitive,
            } => Bson::RegularExpression(Regex {
                pattern: pattern.clone(),
                options: if *case_insensitive { "i" } else { "" }.to_string(),
            }),
        };
        query.insert(path, value);
    }
    Ok(query)
}

/// BSON form of a stored document.
pub fn to_bson_document(document: &Document) -> StorageResult<bson::Document> {
    bson::to_document(document)
        .map_err(|e| StorageError::invalid_document(format!("cannot encode document: {e}")))
}

/// JSON form of a document read from the database.
///
/// An `ObjectId` primary key is rendered as its hex string.
pub fn from_bson_document(mut document: bson::Document) -> StorageResult<Document> {
    if let Some(Bson::ObjectId(oid)) = document.get(STORAGE_KEY) {
        let hex = oid.to_hex();
        document.insert(STORAGE_KEY, Bson::String(hex));
    }
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::invalid_document(format!(
            "expected a document, got {other}"
        ))),
    }
}

/// JSON form of an inserted id.
pub fn key_to_json(key: Bson) -> Value {
    match key {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}

fn json_to_bson(value: &Value) -> StorageResult<Bson> {
    bson::to_bson(value)
        .map_err(|e| StorageError::invalid_filter(format!("cannot encode value {value}: {e}")))
}
