//! # fhirdoc-storage
//!
//! Document store abstraction for fhirdoc.
//!
//! This crate defines the traits and types that document backends implement.
//! Implementations live in separate crates (`fhirdoc-db-memory`,
//! `fhirdoc-db-mongo`).
//!
//! ## Example
//!
//! ```ignore
//! use fhirdoc_storage::{DocumentStore, Filter, StorageResult};
//!
//! async fn organization_exists(store: &dyn DocumentStore, id: &str) -> StorageResult<bool> {
//!     let found = store
//!         .collection("Organization")
//!         .find_one(&Filter::eq("id", id))
//!         .await?;
//!     Ok(found.is_some())
//! }
//! ```

mod error;
pub mod filter;
mod traits;
mod types;

pub use error::{ErrorCategory, StorageError};
pub use fhirdoc_core::{Document, STORAGE_KEY};
pub use filter::{Condition, Filter};
pub use traits::{Collection, DocumentStore};
pub use types::{DocumentCursor, InsertOneResult, ReplaceOptions};

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared store trait object.
pub type DynStore = std::sync::Arc<dyn DocumentStore>;

/// Type alias for a shared collection trait object.
pub type DynCollection = std::sync::Arc<dyn Collection>;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorCategory, StorageError};
    pub use crate::filter::{Condition, Filter};
    pub use crate::traits::{Collection, DocumentStore};
    pub use crate::types::{DocumentCursor, InsertOneResult, ReplaceOptions};
    pub use crate::{Document, DynCollection, DynStore, STORAGE_KEY, StorageResult};
}
