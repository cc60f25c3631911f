//! Token search parameter implementation.
//!
//! Token search is used for coded elements (Coding, CodeableConcept,
//! Identifier). Only the default `system|code` form is supported.

use fhirdoc_storage::{Condition, Filter};
use serde_json::Value;

/// Parse a token value into system and code parts.
///
/// Token values can be in the following formats:
/// - `system|code` - match both system and code
/// - `|code` - match code with no system (explicit null system)
/// - `code` - match code in any system
pub fn parse_token_value(value: &str) -> (Option<&str>, &str) {
    match value.split_once('|') {
        Some((system, rest)) => {
            // Anything after a second bar is dropped.
            let code = rest.split('|').next().unwrap_or_default();
            (Some(system), code)
        }
        None => (None, value),
    }
}

/// Partial filter for a token parameter.
///
/// `field` is the path of the coding elements (e.g. `code.coding`) and
/// `kind` the element holding the code (`code` for codings, `value` for
/// identifiers). When the value carries a system and `required_system` is
/// set, the required system replaces the supplied one. Empty parts add no
/// condition.
pub fn token_query(target: &str, kind: &str, field: &str, required_system: Option<&str>) -> Filter {
    let (system, code) = parse_token_value(target);
    let system = match (system, required_system) {
        (Some(_), Some(required)) if !required.is_empty() => Some(required),
        (system, _) => system,
    };

    let mut filter = Filter::new();
    if let Some(system) = system.filter(|s| !s.is_empty()) {
        filter.insert(
            format!("{field}.system"),
            Condition::Equals(Value::String(system.to_string())),
        );
    }
    if !code.is_empty() {
        filter.insert(
            format!("{field}.{kind}"),
            Condition::Equals(Value::String(code.to_string())),
        );
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_token_value() {
        assert_eq!(parse_token_value("http://loinc.org|8867-4"), (Some("http://loinc.org"), "8867-4"));
        assert_eq!(parse_token_value("|8867-4"), (Some(""), "8867-4"));
        assert_eq!(parse_token_value("8867-4"), (None, "8867-4"));
        assert_eq!(parse_token_value("sys|"), (Some("sys"), ""));
        assert_eq!(parse_token_value("a|b|c"), (Some("a"), "b"));
    }

    #[test]
    fn test_code_only() {
        let filter = token_query("vital-signs", "code", "category.coding", None);
        assert_eq!(filter.len(), 1);
        assert_eq!(
            filter.get("category.coding.code"),
            Some(&Condition::Equals(json!("vital-signs")))
        );
    }

    #[test]
    fn test_system_and_code() {
        let filter = token_query("http://loinc.org|8867-4", "code", "code.coding", None);
        assert_eq!(
            filter.get("code.coding.system"),
            Some(&Condition::Equals(json!("http://loinc.org")))
        );
        assert_eq!(
            filter.get("code.coding.code"),
            Some(&Condition::Equals(json!("8867-4")))
        );
    }

    #[test]
    fn test_empty_system_adds_no_condition() {
        let filter = token_query("|8867-4", "code", "code.coding", None);
        assert!(filter.get("code.coding.system").is_none());
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_required_system_overrides() {
        let filter = token_query("other|123", "value", "identifier", Some("urn:required"));
        assert_eq!(
            filter.get("identifier.system"),
            Some(&Condition::Equals(json!("urn:required")))
        );
        assert_eq!(
            filter.get("identifier.value"),
            Some(&Condition::Equals(json!("123")))
        );

        // No bar, no system.
        let filter = token_query("123", "value", "identifier", Some("urn:required"));
        assert!(filter.get("identifier.system").is_none());

        // An empty requirement changes nothing.
        let filter = token_query("other|123", "value", "identifier", Some(""));
        assert_eq!(
            filter.get("identifier.system"),
            Some(&Condition::Equals(json!("other")))
        );
    }

    #[test]
    fn test_matches_codings() {
        let doc = json!({
            "code": {"coding": [{"system": "http://loinc.org", "code": "8867-4"}]}
        });
        let doc = doc.as_object().unwrap();
        assert!(token_query("8867-4", "code", "code.coding", None).matches(doc).unwrap());
        assert!(
            token_query("http://loinc.org|8867-4", "code", "code.coding", None)
                .matches(doc)
                .unwrap()
        );
        assert!(
            !token_query("http://snomed.info/sct|8867-4", "code", "code.coding", None)
                .matches(doc)
                .unwrap()
        );
    }
}
