//! Snapshot store
//!
//! Composes a [`SnapshotBackend`] into the immutable `(slug, version)` record
//! the publish pipeline reads and appends to. Every public operation runs
//! under one [`Deadline`] built from the configured timeout.

use crate::backend::{CreateOutcome, SnapshotBackend};
use crate::deadline::Deadline;
use crate::errors::{
    corrupt_snapshot, snapshot_not_found, store_unavailable, version_conflict, Result,
};
use chrono::{DateTime, Utc};
use pressroom_core::errors::{ExError, ExErrorKind};
use pressroom_core::model::{Document, Version};
use pressroom_core::rules::validate_slug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Persisted record of one publish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: Version,
    pub document: Document,
    pub changelog: String,
    pub published_at: DateTime<Utc>,
}

pub struct SnapshotStore {
    backend: Box<dyn SnapshotBackend>,
    timeout: Duration,
}

impl SnapshotStore {
    pub fn new(backend: impl SnapshotBackend + 'static, timeout: Duration) -> Self {
        Self::from_boxed(Box::new(backend), timeout)
    }

    pub fn from_boxed(backend: Box<dyn SnapshotBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn deadline(&self) -> Deadline {
        Deadline::after(self.timeout)
    }

    /// Record a new immutable snapshot.
    ///
    /// # Errors
    ///
    /// - `ExErrorKind::VersionConflict`: `(slug, version)` already exists
    /// - `ExErrorKind::StoreUnavailable`: backend unreachable or timed out
    /// - `ExErrorKind::Validation`: slug cannot form a storage key
    pub fn write(
        &self,
        slug: &str,
        version: &Version,
        document: &Document,
        changelog: &str,
    ) -> Result<Snapshot> {
        checked_slug("snapshot_write", slug)?;

        let snapshot = Snapshot {
            version: *version,
            document: document.clone(),
            changelog: changelog.to_string(),
            published_at: Utc::now(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("snapshot_write")
                .with_slug(slug)
                .with_message(format!("Failed to serialize snapshot: {}", e))
        })?;

        match self
            .backend
            .create_if_absent(slug, version, &bytes, &self.deadline())?
        {
            CreateOutcome::Created => {
                tracing::debug!(
                    slug = %slug,
                    version = %version,
                    backend = self.backend.name(),
                    size_bytes = bytes.len(),
                    "Wrote snapshot"
                );
                Ok(snapshot)
            }
            CreateOutcome::AlreadyExists => Err(version_conflict(slug, version)),
        }
    }

    /// Every stored version of `slug`, ascending.
    ///
    /// Entry names that do not parse as a version are skipped.
    ///
    /// # Errors
    ///
    /// - `ExErrorKind::StoreUnavailable`: the backend cannot be listed
    /// - `ExErrorKind::Validation`: slug cannot form a storage key
    pub fn history(&self, slug: &str) -> Result<Vec<Version>> {
        checked_slug("snapshot_history", slug)?;
        let mut versions = self.list_versions(slug, &self.deadline())?;
        versions.sort();
        Ok(versions)
    }

    /// Largest stored version of `slug`, if any.
    ///
    /// # Errors
    ///
    /// - `ExErrorKind::StoreUnavailable`: the backend cannot be listed
    /// - `ExErrorKind::Validation`: slug cannot form a storage key
    pub fn latest_version(&self, slug: &str) -> Result<Option<Version>> {
        checked_slug("snapshot_latest_version", slug)?;
        Ok(self.list_versions(slug, &self.deadline())?.into_iter().max())
    }

    /// Snapshot with the maximum version under tuple order.
    ///
    /// # Errors
    ///
    /// - `ExErrorKind::NotFound`: nothing has been published under `slug`
    /// - `ExErrorKind::StoreUnavailable`: backend unreachable or timed out
    /// - `ExErrorKind::CorruptSnapshot`: the latest entry cannot be decoded
    /// - `ExErrorKind::Validation`: slug cannot form a storage key
    pub fn get_latest(&self, slug: &str) -> Result<Snapshot> {
        checked_slug("snapshot_get_latest", slug)?;
        let deadline = self.deadline();
        let latest = self
            .list_versions(slug, &deadline)?
            .into_iter()
            .max()
            .ok_or_else(|| snapshot_not_found("snapshot_get_latest", slug, None))?;

        match self.backend.read(slug, &latest, &deadline)? {
            Some(bytes) => decode(slug, &latest, &bytes),
            // Listed a moment ago; the backend is not answering consistently
            None => Err(store_unavailable(
                "snapshot_get_latest",
                self.backend.name(),
                format!("listed entry {} for '{}' could not be read", latest, slug),
            )),
        }
    }

    /// Snapshot stored for one exact version.
    ///
    /// # Errors
    ///
    /// - `ExErrorKind::NotFound`: no entry for `(slug, version)`
    /// - `ExErrorKind::StoreUnavailable`: backend unreachable or timed out
    /// - `ExErrorKind::CorruptSnapshot`: the entry cannot be decoded
    /// - `ExErrorKind::Validation`: slug cannot form a storage key
    pub fn get(&self, slug: &str, version: &Version) -> Result<Snapshot> {
        checked_slug("snapshot_get", slug)?;
        match self.backend.read(slug, version, &self.deadline())? {
            Some(bytes) => decode(slug, version, &bytes),
            None => Err(snapshot_not_found("snapshot_get", slug, Some(version))),
        }
    }

    fn list_versions(&self, slug: &str, deadline: &Deadline) -> Result<Vec<Version>> {
        let names = self.backend.list(slug, deadline)?;
        Ok(names
            .iter()
            .filter_map(|name| match name.parse::<Version>() {
                Ok(version) => Some(version),
                Err(_) => {
                    tracing::warn!(
                        slug = %slug,
                        entry = %name,
                        backend = self.backend.name(),
                        "Skipping entry that is not a version"
                    );
                    None
                }
            })
            .collect())
    }
}

/// Slugs are joined into paths and object keys, so every entry point checks them
fn checked_slug(op: &str, slug: &str) -> Result<()> {
    validate_slug(slug).map_err(|issue| ExError::from(issue).with_op(op).with_slug(slug))
}

fn decode(slug: &str, version: &Version, bytes: &[u8]) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_slice(bytes)
        .map_err(|e| corrupt_snapshot(slug, version, format!("Invalid snapshot JSON: {}", e)))?;

    if snapshot.version != *version {
        return Err(corrupt_snapshot(
            slug,
            version,
            format!("entry records version {}", snapshot.version),
        ));
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryObjectClient, ObjectStoreBackend};

    fn memory_store() -> (SnapshotStore, MemoryObjectClient) {
        let client = MemoryObjectClient::new();
        let store = SnapshotStore::new(
            ObjectStoreBackend::new(client.clone()),
            Duration::from_secs(5),
        );
        (store, client)
    }

    fn doc() -> Document {
        Document::new("p", "home", "Home")
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let (store, client) = memory_store();
        store
            .write("home", &Version::new(0, 1, 0), &doc(), "- Added hero section")
            .unwrap();

        let raw = client.object("releases/home/0.1.0.json").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();

        assert_eq!(value["version"], "0.1.0");
        assert_eq!(value["changelog"], "- Added hero section");
        assert_eq!(value["document"]["pageId"], "p");
        assert!(value["publishedAt"].is_string());
    }

    #[test]
    fn test_version_mismatch_is_corrupt() {
        let (store, client) = memory_store();
        store.write("home", &Version::new(1, 0, 0), &doc(), "x").unwrap();
        let raw = client.object("releases/home/1.0.0.json").unwrap();
        client.insert("releases/home/2.0.0.json", &raw);

        let err = store.get_latest("home").unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::CorruptSnapshot);
        assert_eq!(err.version(), Some("2.0.0"));
    }

    #[test]
    fn test_unparseable_entries_are_skipped() {
        let (store, client) = memory_store();
        store.write("home", &Version::new(0, 2, 0), &doc(), "x").unwrap();
        client.insert("releases/home/latest.json", b"{}");
        client.insert("releases/home/v1.0.0.json", b"{}");

        assert_eq!(store.history("home").unwrap(), vec![Version::new(0, 2, 0)]);
        assert_eq!(store.get_latest("home").unwrap().version, Version::new(0, 2, 0));
    }

    #[test]
    fn test_write_rejects_unsafe_slug() {
        let (store, client) = memory_store();

        let err = store
            .write("../escape", &Version::new(0, 1, 0), &doc(), "x")
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Validation);
        assert!(client.is_empty());
    }
}
