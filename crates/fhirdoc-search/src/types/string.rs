//! String search parameter implementation.
//!
//! Default string matching is starts-with and case-insensitive.

use fhirdoc_storage::Condition;

/// Condition matching strings that start with `target`, ignoring case.
///
/// Regex metacharacters in `target` are escaped.
pub fn string_query(target: &str) -> Condition {
    Condition::regex_ci(format!("^{}", regex::escape(target)))
}
