//! Remote object store backend
//!
//! Snapshot keys are object names (`releases/<slug>/<version>.json`). The
//! transport is an [`ObjectClient`], so the same backend runs against the
//! HTTP client in production and the in-memory client in tests.

use crate::backend::{CreateOutcome, SnapshotBackend};
use crate::deadline::Deadline;
use crate::errors::Result;
use crate::layout::{entry_version_name, slug_prefix, snapshot_key};
use pressroom_core::model::Version;
use std::time::Duration;

/// Minimal object store protocol.
///
/// `timeout` is the time left on the caller's deadline for this request.
pub trait ObjectClient: Send + Sync {
    fn name(&self) -> &'static str;

    /// Keys starting with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::StoreUnavailable` if the store cannot be reached.
    fn list_keys(&self, prefix: &str, timeout: Duration) -> Result<Vec<String>>;

    /// Object bytes, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::StoreUnavailable` if the store cannot be reached.
    fn get_object(&self, key: &str, timeout: Duration) -> Result<Option<Vec<u8>>>;

    /// Conditional put that never replaces an existing object.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::StoreUnavailable` if the store cannot be reached.
    fn put_if_absent(&self, key: &str, bytes: &[u8], timeout: Duration) -> Result<CreateOutcome>;
}

pub struct ObjectStoreBackend<C> {
    client: C,
}

impl<C: ObjectClient> ObjectStoreBackend<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: ObjectClient> SnapshotBackend for ObjectStoreBackend<C> {
    fn name(&self) -> &'static str {
        self.client.name()
    }

    fn list(&self, slug: &str, deadline: &Deadline) -> Result<Vec<String>> {
        let prefix = slug_prefix(slug);
        let keys = self
            .client
            .list_keys(&prefix, deadline.check("object_list")?)?;

        Ok(keys
            .iter()
            .filter_map(|key| key.strip_prefix(&prefix))
            // Deeper keys belong to a different layout
            .filter(|rest| !rest.contains('/'))
            .filter_map(entry_version_name)
            .map(str::to_string)
            .collect())
    }

    fn read(&self, slug: &str, version: &Version, deadline: &Deadline) -> Result<Option<Vec<u8>>> {
        self.client.get_object(
            &snapshot_key(slug, version),
            deadline.check("object_read")?,
        )
    }

    fn create_if_absent(
        &self,
        slug: &str,
        version: &Version,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<CreateOutcome> {
        self.client.put_if_absent(
            &snapshot_key(slug, version),
            bytes,
            deadline.check("object_create")?,
        )
    }
}
