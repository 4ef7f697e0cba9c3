//! Version calculator.
//!
//! Maps a diff to a bump class and applies the bump to the previous version.

use crate::diff::{ChangeType, DiffResult};
use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::Version;
use serde::{Deserialize, Serialize};

/// Magnitude by which a version advances
///
/// Variants are declared in increasing order so that `Ord` ranks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpClass {
    None,
    Patch,
    Minor,
    Major,
}

impl BumpClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpClass::None => "none",
            BumpClass::Patch => "patch",
            BumpClass::Minor => "minor",
            BumpClass::Major => "major",
        }
    }
}

impl std::fmt::Display for BumpClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determine the bump class for a diff.
///
/// - any `removed` or `type-changed` → `major` (returns on the first one)
/// - otherwise any `added` → `minor`
/// - otherwise any `content-changed` → `patch`
/// - no changes → `none`
pub fn bump_class(diff: &DiffResult) -> BumpClass {
    let mut class = BumpClass::None;

    for change in diff.changes() {
        match change.change_type() {
            ChangeType::Removed | ChangeType::TypeChanged => return BumpClass::Major,
            ChangeType::Added => class = BumpClass::Minor,
            ChangeType::ContentChanged => class = class.max(BumpClass::Patch),
        }
    }

    class
}

fn overflow(previous: Version, class: BumpClass) -> ExError {
    ExError::new(ExErrorKind::VersionOverflow)
        .with_op("apply_bump")
        .with_version(previous)
        .with_message(format!("{} bump exceeds the version component range", class))
}

/// Apply a bump class to a version.
///
/// # Errors
///
/// - `VersionOverflow`: the bumped component would exceed `u64::MAX`
pub fn apply_bump(previous: Version, class: BumpClass) -> Result<Version> {
    let next = match class {
        BumpClass::None => Some(previous),
        BumpClass::Patch => previous
            .patch
            .checked_add(1)
            .map(|patch| Version::new(previous.major, previous.minor, patch)),
        BumpClass::Minor => previous
            .minor
            .checked_add(1)
            .map(|minor| Version::new(previous.major, minor, 0)),
        BumpClass::Major => previous
            .major
            .checked_add(1)
            .map(|major| Version::new(major, 0, 0)),
    };

    next.ok_or_else(|| overflow(previous, class))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_classes_are_ordered() {
        assert!(BumpClass::Major > BumpClass::Minor);
        assert!(BumpClass::Minor > BumpClass::Patch);
        assert!(BumpClass::Patch > BumpClass::None);
    }

    #[test]
    fn test_none_leaves_version_unchanged() {
        let v = Version::new(3, 1, 4);
        assert_eq!(apply_bump(v, BumpClass::None).unwrap(), v);
    }

    #[test]
    fn test_overflow_is_an_error_not_a_wrap() {
        let v = Version::new(u64::MAX, 0, 0);
        let err = apply_bump(v, BumpClass::Major).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::VersionOverflow);

        // Lower components reset, so a minor bump from a maxed patch is fine
        let v = Version::new(0, 0, u64::MAX);
        assert_eq!(apply_bump(v, BumpClass::Minor).unwrap(), Version::new(0, 1, 0));
    }

    #[test]
    fn test_bump_class_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&BumpClass::Minor).unwrap(), "\"minor\"");
    }
}
