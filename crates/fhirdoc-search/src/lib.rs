//! Search parameter translation for fhirdoc.
//!
//! Builders in [`types`] turn one raw search parameter value into a partial
//! [`Filter`](fhirdoc_storage::Filter); a service merges the partial filters
//! of every parameter it supports. [`observation`] holds the Observation
//! parameter set.

pub mod observation;
pub mod types;

pub use observation::ObservationSearchParams;
pub use types::number::{number_equals_query, parse_number};
pub use types::reference::reference_query;
pub use types::string::string_query;
pub use types::token::{parse_token_value, token_query};
