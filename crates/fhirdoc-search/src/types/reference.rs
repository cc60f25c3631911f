//! Reference search parameter implementation.
//!
//! The value can be:
//! - A full URL: "http://example.org/fhir/Patient/123"
//! - A relative reference: "Patient/123"
//! - An ID only: "123"

use fhirdoc_storage::{Condition, Filter};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn absolute_reference() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"http(.*)?/(\w+/.+)$").expect("static absolute reference pattern")
    })
}

/// Partial filter on the reference string stored at `field`.
///
/// A full URL is reduced to its trailing `Type/id` and matched exactly, as
/// is a relative reference. A bare id matches any reference ending in it.
pub fn reference_query(target: &str, field: &str) -> Filter {
    let condition = if let Some(relative) = absolute_reference()
        .captures(target)
        .and_then(|c| c.get(2))
    {
        Condition::Equals(Value::String(relative.as_str().to_string()))
    } else if let Some((kind, rest)) = target.split_once('/') {
        let id = rest.split('/').next().unwrap_or_default();
        Condition::Equals(Value::String(format!("{kind}/{id}")))
    } else {
        Condition::regex(format!("{}$", regex::escape(target)))
    };

    Filter::new().with(field, condition)
}
