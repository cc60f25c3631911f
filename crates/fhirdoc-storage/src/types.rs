//! Operation options and results shared by all backends.

use futures_util::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::{Document, StorageResult};

/// Result of a successful `insert_one`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertOneResult {
    /// Primary key of the inserted document.
    pub inserted_id: Value,
}

/// Options for `find_one_and_replace`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceOptions {
    /// Insert the replacement when nothing matches.
    pub upsert: bool,
}

impl ReplaceOptions {
    #[must_use]
    pub fn upsert() -> Self {
        Self { upsert: true }
    }
}

/// Stream of documents returned by `find`.
///
/// Documents arrive in the backend's natural order.
pub struct DocumentCursor {
    inner: BoxStream<'static, StorageResult<Document>>,
}

impl DocumentCursor {
    pub fn new(inner: BoxStream<'static, StorageResult<Document>>) -> Self {
        Self { inner }
    }

    /// Cursor over documents already in memory.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self::new(stream::iter(documents.into_iter().map(Ok)).boxed())
    }

    /// Drains the cursor, stopping at the first error.
    pub async fn try_collect_vec(self) -> StorageResult<Vec<Document>> {
        self.inner.try_collect().await
    }
}

impl Stream for DocumentCursor {
    type Item = StorageResult<Document>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for DocumentCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentCursor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;
    use serde_json::json;
    use tokio_test::block_on;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_cursor_preserves_order() {
        let cursor = DocumentCursor::from_documents(vec![
            doc(json!({"n": 1})),
            doc(json!({"n": 2})),
            doc(json!({"n": 3})),
        ]);
        let docs = cursor.try_collect_vec().await.unwrap();
        let ns: Vec<i64> = docs.iter().filter_map(|d| d["n"].as_i64()).collect();
        assert_eq!(ns, vec![1, 2, 3]);
    }

    #[test]
    fn test_cursor_stops_on_error() {
        let items: Vec<StorageResult<Document>> = vec![
            Ok(doc(json!({"n": 1}))),
            Err(StorageError::connection_error("reset")),
            Ok(doc(json!({"n": 2}))),
        ];
        let cursor = DocumentCursor::new(stream::iter(items).boxed());
        let err = block_on(cursor.try_collect_vec()).unwrap_err();
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_cursor_is_a_stream() {
        let mut cursor = DocumentCursor::from_documents(vec![doc(json!({"n": 1}))]);
        assert!(cursor.next().await.is_some());
        assert!(cursor.next().await.is_none());
    }

    #[test]
    fn test_replace_options() {
        assert!(!ReplaceOptions::default().upsert);
        assert!(ReplaceOptions::upsert().upsert);
    }
}
