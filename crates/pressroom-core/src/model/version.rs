//! Semantic version triple
//!
//! Ordering is the derived lexicographic order over `(major, minor, patch)`;
//! the textual form is never compared.

use crate::errors::{ExError, ExErrorKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Baseline version of a document that has never been published
    pub const INITIAL: Version = Version::new(0, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parse one numeric component: ASCII digits only, no sign, no whitespace
fn parse_component(raw: &str, input: &str) -> Result<u64, ExError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(input));
    }
    raw.parse::<u64>().map_err(|_| invalid(input))
}

fn invalid(input: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidVersion)
        .with_op("parse_version")
        .with_message(format!(
            "'{}' is not a version of the form major.minor.patch",
            input
        ))
}

impl FromStr for Version {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid(s));
        };

        Ok(Version::new(
            parse_component(major, s)?,
            parse_component(minor, s)?,
            parse_component(patch, s)?,
        ))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
