//! MongoDB backend for the fhirdoc document store.
//!
//! [`MongoStore`] implements `DocumentStore` over a `mongodb::Database`.
//! Filters are translated to BSON query documents and documents travel as
//! relaxed extended JSON.
//!
//! ```ignore
//! use fhirdoc_db_mongo::MongoStore;
//!
//! let store = MongoStore::connect("mongodb://localhost:27017", "fhirdoc").await?;
//! ```

mod convert;
mod error;
mod store;

pub use convert::{filter_to_bson, from_bson_document, to_bson_document};
pub use error::map_driver_error;
pub use store::{MongoCollection, MongoStore};
