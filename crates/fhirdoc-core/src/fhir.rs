use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// FHIR specification version a request is served under.
///
/// The canonical spelling is the `base_version` path segment used by the
/// router (`1_0_2`, `3_0_1`, `4_0_0`); it also selects the per-version
/// storage collection, e.g. `Observation_3_0_1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FhirVersion {
    Dstu2,
    Stu3,
    R4,
}

impl FhirVersion {
    pub const ALL: [FhirVersion; 3] = [FhirVersion::Dstu2, FhirVersion::Stu3, FhirVersion::R4];

    /// The `base_version` spelling of this version.
    pub fn as_base_version(&self) -> &'static str {
        match self {
            FhirVersion::Dstu2 => "1_0_2",
            FhirVersion::Stu3 => "3_0_1",
            FhirVersion::R4 => "4_0_0",
        }
    }

    /// Release name, for logs and diagnostics.
    pub fn release_name(&self) -> &'static str {
        match self {
            FhirVersion::Dstu2 => "DSTU2",
            FhirVersion::Stu3 => "STU3",
            FhirVersion::R4 => "R4",
        }
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_base_version())
    }
}

impl FromStr for FhirVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1_0_2" | "1.0.2" | "DSTU2" => Ok(FhirVersion::Dstu2),
            "3_0_1" | "3.0.1" | "STU3" => Ok(FhirVersion::Stu3),
            "4_0_0" | "4.0.0" | "R4" => Ok(FhirVersion::R4),
            _ => Err(CoreError::unsupported_version(s)),
        }
    }
}

impl Default for FhirVersion {
    fn default() -> Self {
        FhirVersion::R4
    }
}

impl Serialize for FhirVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_base_version())
    }
}

impl<'de> Deserialize<'de> for FhirVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FhirVersion::from_str(&s).map_err(serde::de::Error::custom)
    }
}
