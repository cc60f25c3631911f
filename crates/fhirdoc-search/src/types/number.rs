//! Number search parameter implementation.

use fhirdoc_storage::{Condition, Filter};

/// Parses a raw parameter into a number.
///
/// Surrounding whitespace is ignored, a blank value is zero, `0x`/`0o`/`0b`
/// prefixes select the radix and `Infinity` is accepted with an optional
/// sign. Anything else that is not a decimal literal yields `NaN`.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let lower = trimmed.to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust also accepts "inf" and "nan" spellings; those are not numbers here.
    if lower.contains("inf") || lower.contains("nan") {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Partial filter matching documents whose value at `field` is numerically
/// equal to `raw`. An unparseable value matches nothing.
pub fn number_equals_query(raw: &str, field: &str) -> Filter {
    Filter::new().with(field, Condition::NumberEquals(parse_number(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_number("5"), 5.0);
        assert_eq!(parse_number(" 7.25 "), 7.25);
        assert_eq!(parse_number("-3"), -3.0);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number(".5"), 0.5);
    }

    #[test]
    fn test_parse_blank_is_zero() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
    }

    #[test]
    fn test_parse_radix_prefixes() {
        assert_eq!(parse_number("0x1A"), 26.0);
        assert_eq!(parse_number("0b101"), 5.0);
        assert_eq!(parse_number("0o17"), 15.0);
        assert!(parse_number("0xZZ").is_nan());
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
    }

    #[test]
    fn test_parse_garbage_is_nan() {
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("5 mg").is_nan());
    }

    #[test]
    fn test_number_equals_query() {
        let filter = number_equals_query("120", "valueQuantity.value");
        let doc = json!({"valueQuantity": {"value": 120.0}});
        assert!(filter.matches(doc.as_object().unwrap()).unwrap());

        let doc = json!({"valueQuantity": {"value": 121}});
        assert!(!filter.matches(doc.as_object().unwrap()).unwrap());

        let nan = number_equals_query("high", "valueQuantity.value");
        let doc = json!({"valueQuantity": {"value": 120}});
        assert!(!nan.matches(doc.as_object().unwrap()).unwrap());
    }
}
