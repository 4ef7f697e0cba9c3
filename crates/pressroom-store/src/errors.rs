//! Error handling for pressroom-store
//!
//! Wraps pressroom-core ExError with store-specific helpers

use pressroom_core::errors::{ExError, ExErrorKind};
use pressroom_core::model::Version;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a backend-unreachable error
pub fn store_unavailable(operation: &str, backend: &str, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::StoreUnavailable)
        .with_op(operation.to_string())
        .with_message(format!("{} backend unavailable: {}", backend, reason))
}

/// Create a conflict error for an existing `(slug, version)` entry
pub fn version_conflict(slug: &str, version: &Version) -> ExError {
    ExError::new(ExErrorKind::VersionConflict)
        .with_op("snapshot_write")
        .with_slug(slug)
        .with_version(version)
        .with_message("a snapshot already exists for this version")
}

/// Create a not-found error for a slug or a specific version
pub fn snapshot_not_found(operation: &str, slug: &str, version: Option<&Version>) -> ExError {
    let err = ExError::new(ExErrorKind::NotFound)
        .with_op(operation.to_string())
        .with_slug(slug);
    match version {
        Some(version) => err
            .with_version(version)
            .with_message("no snapshot stored for this version"),
        None => err.with_message("no snapshot has been published for this slug"),
    }
}

/// Create an error for a stored entry that cannot be trusted
pub fn corrupt_snapshot(slug: &str, version: &Version, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::CorruptSnapshot)
        .with_op("snapshot_read")
        .with_slug(slug)
        .with_version(version)
        .with_message(reason.to_string())
}

/// Create an IO error
///
/// A filesystem that cannot be read or written is an unreachable backend.
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::StoreUnavailable)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an internal error for a poisoned lock
pub fn lock_poisoned(operation: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(operation.to_string())
        .with_message("store lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_unavailable_not_missing() {
        let err = io_error(
            "fs_list",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ExErrorKind::StoreUnavailable);
        assert_eq!(err.op(), Some("fs_list"));
    }

    #[test]
    fn test_conflict_carries_key() {
        let err = version_conflict("home", &Version::new(1, 0, 0));
        assert_eq!(err.kind(), ExErrorKind::VersionConflict);
        assert_eq!(err.slug(), Some("home"));
        assert_eq!(err.version(), Some("1.0.0"));
    }
}
