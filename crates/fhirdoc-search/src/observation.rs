//! Observation search parameters.
//!
//! Every parameter below is recognized. Only `based-on`, `category`, `code`
//! and `value-string` contribute to the filter; the others are accepted and
//! carried along without effect.

use fhirdoc_storage::Filter;
use serde::Serialize;

use crate::types::number::number_equals_query;
use crate::types::reference::reference_query;
use crate::types::token::token_query;

/// Parameters common to every resource type.
pub const COMMON_PARAMS: &[&str] = &[
    "_content",
    "_format",
    "_id",
    "_lastUpdated",
    "_profile",
    "_query",
    "_security",
    "_tag",
];

/// Parameters shaping the result set.
pub const RESULT_PARAMS: &[&str] = &[
    "_include",
    "_revinclude",
    "_sort",
    "_count",
    "_summary",
    "_elements",
    "_contained",
    "_containedType",
];

/// Observation-specific parameters.
pub const OBSERVATION_PARAMS: &[&str] = &[
    "based-on",
    "category",
    "code",
    "code-value-concept",
    "code-value-date",
    "code-value-quantity",
    "code-value-string",
    "combo-code",
    "combo-code-value-concept",
    "combo-code-value-quantity",
    "combo-data-absent-reason",
    "combo-value-concept",
    "combo-value-quantity",
    "component-code",
    "component-code-value-concept",
    "component-code-value-quantity",
    "component-data-absent-reason",
    "component-value-concept",
    "component-value-quantity",
    "_context",
    "data-absent-reason",
    "date",
    "device",
    "encounter",
    "identifier",
    "method",
    "patient",
    "performer",
    "related",
    "related-target",
    "related-type",
    "specimen",
    "status",
    "reference",
    "value-concept",
    "value-date",
    "value-quantity",
    "value-string",
];

const TRANSLATED: &[&str] = &["based-on", "category", "code", "value-string"];

/// Recognized Observation search parameters present in a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObservationSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    /// Recognized parameters that do not affect the filter, in catalog order.
    pub accepted: Vec<(&'static str, String)>,
}

impl ObservationSearchParams {
    /// Reads every recognized parameter through `lookup`. Empty values are
    /// treated as absent; unrecognized names are never asked for.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let mut params = Self {
            based_on: get("based-on"),
            category: get("category"),
            code: get("code"),
            value_string: get("value-string"),
            accepted: Vec::new(),
        };

        for name in Self::recognized().filter(|n| !TRANSLATED.contains(n)) {
            if let Some(value) = get(name) {
                params.accepted.push((name, value));
            }
        }
        params
    }

    /// Every recognized parameter name.
    pub fn recognized() -> impl Iterator<Item = &'static str> {
        COMMON_PARAMS
            .iter()
            .chain(RESULT_PARAMS)
            .chain(OBSERVATION_PARAMS)
            .copied()
    }

    pub fn is_recognized(name: &str) -> bool {
        Self::recognized().any(|n| n == name)
    }

    /// Names of the present parameters that the filter ignores.
    pub fn ignored(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accepted.iter().map(|(name, _)| *name)
    }

    /// Builds the document filter from the translated parameters.
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();

        if let Some(based_on) = &self.based_on {
            filter.merge(reference_query(based_on, "basedOn.reference"));
        }
        if let Some(category) = &self.category {
            filter.merge(token_query(category, "code", "category.coding", None));
        }
        if let Some(code) = &self.code {
            filter.merge(token_query(code, "code", "code.coding", None));
        }
        if let Some(value) = &self.value_string {
            // Values are matched against the numeric quantity.
            filter.merge(number_equals_query(value, "valueQuantity.value"));
        }

        if !self.accepted.is_empty() {
            tracing::debug!(
                ignored = ?self.ignored().collect::<Vec<_>>(),
                "Observation search parameters accepted without a filter"
            );
        }
        filter
    }
}
