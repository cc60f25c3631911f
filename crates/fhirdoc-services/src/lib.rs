//! Organization and Observation service handlers.
//!
//! Each service owns a handle to the document store and exposes one async
//! method per operation. Methods take the router's [`ServiceArgs`] (and a
//! [`RequestContext`] where the raw body matters) and make at most two
//! store calls.
//!
//! ```ignore
//! use fhirdoc_db_memory::create_memory_store;
//! use fhirdoc_services::{OrganizationService, ServiceArgs};
//!
//! let organizations = OrganizationService::new(create_memory_store());
//! let total = organizations.get_count(&ServiceArgs::new()).await?;
//! ```

pub mod args;
pub mod error;
pub mod observation;
pub mod organization;
pub mod outcome;

pub use args::{RequestContext, ServiceArgs};
pub use error::{ServiceError, ServiceResult};
pub use observation::ObservationService;
pub use organization::OrganizationService;
pub use outcome::{CreateOutcome, RemoveOutcome, UpdateOutcome};

use fhirdoc_core::FhirVersion;

/// Collection holding Organization documents.
pub const ORGANIZATION_COLLECTION: &str = "Organization";

/// Collection holding current Observation documents for `version`.
pub fn observation_collection(version: FhirVersion) -> String {
    format!("Observation_{}", version.as_base_version())
}

/// Collection holding Observation snapshots for `version`.
pub fn observation_history_collection(version: FhirVersion) -> String {
    format!("Observation_{}_History", version.as_base_version())
}
