use crate::error::{CoreError, Result};
use std::fmt;
use std::str::FromStr;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Second-precision instant with a `+hh:mm` offset, the shape written to
/// `meta.lastUpdated`.
const LAST_UPDATED_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FhirDateTime(pub OffsetDateTime);

impl FhirDateTime {
    pub fn new(datetime: OffsetDateTime) -> Self {
        Self(datetime)
    }

    /// Formats the instant in UTC as `YYYY-MM-DDTHH:mm:ss+00:00`.
    pub fn to_last_updated(&self) -> String {
        self.0
            .to_offset(UtcOffset::UTC)
            .format(LAST_UPDATED_FORMAT)
            .unwrap_or_else(|_| self.to_string())
    }
}

impl fmt::Display for FhirDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .0
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl FromStr for FhirDateTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let datetime = OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
            .map_err(|e| {
                CoreError::invalid_date_time(format!("Failed to parse FHIR DateTime '{s}': {e}"))
            })?;
        Ok(FhirDateTime(datetime))
    }
}

pub fn now_utc() -> FhirDateTime {
    FhirDateTime(OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_fhir_datetime_display() {
        let fhir_dt = FhirDateTime::new(datetime!(2023-05-15 14:30:00 UTC));
        assert_eq!(fhir_dt.to_string(), "2023-05-15T14:30:00Z");
    }

    #[test]
    fn test_to_last_updated_utc() {
        let fhir_dt = FhirDateTime::new(datetime!(2023-05-15 14:30:07.250 UTC));
        assert_eq!(fhir_dt.to_last_updated(), "2023-05-15T14:30:07+00:00");
    }

    #[test]
    fn test_to_last_updated_normalizes_offset() {
        let fhir_dt = FhirDateTime::new(datetime!(2023-05-15 14:30:00 +02:00));
        assert_eq!(fhir_dt.to_last_updated(), "2023-05-15T12:30:00+00:00");
    }

    #[test]
    fn test_last_updated_parses_back() {
        let original = now_utc();
        let formatted = original.to_last_updated();
        let parsed = FhirDateTime::from_str(&formatted).unwrap();
        assert_eq!(parsed.0.unix_timestamp(), original.0.unix_timestamp());
    }

    #[test]
    fn test_fhir_datetime_from_str_invalid() {
        assert!(FhirDateTime::from_str("invalid-date").is_err());
        assert!(FhirDateTime::from_str("2023-13-01T00:00:00Z").is_err());
        assert!(FhirDateTime::from_str("").is_err());
    }

    #[test]
    fn test_error_message_content() {
        match FhirDateTime::from_str("bad-date") {
            Err(CoreError::InvalidDateTime(msg)) => {
                assert!(msg.contains("bad-date"));
                assert!(msg.contains("Failed to parse FHIR DateTime"));
            }
            _ => panic!("Expected InvalidDateTime error"),
        }
    }
}
