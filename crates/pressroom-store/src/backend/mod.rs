//! Storage backends
//!
//! A backend offers exactly three capabilities over opaque snapshot bytes.
//! The snapshot store composes them into write / latest / history and never
//! branches on which backend it holds.

mod atomic;
pub mod fs;
pub mod http;
pub mod memory;
pub mod object;

pub use fs::FsBackend;
pub use http::HttpObjectClient;
pub use memory::MemoryObjectClient;
pub use object::{ObjectClient, ObjectStoreBackend};

use crate::deadline::Deadline;
use crate::errors::Result;
use pressroom_core::model::Version;

/// Outcome of a conditional create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// An entry already existed, nothing was written
    AlreadyExists,
}

/// Capability set every storage variant implements.
///
/// Unreachable storage and expired deadlines are reported as
/// `ExErrorKind::StoreUnavailable`. A missing slug or entry is never an
/// error at this level.
pub trait SnapshotBackend: Send + Sync {
    /// Short backend name for logs and error messages
    fn name(&self) -> &'static str;

    /// Version identifiers stored for `slug`, unparsed and unordered.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::StoreUnavailable` if the backend cannot be listed.
    fn list(&self, slug: &str, deadline: &Deadline) -> Result<Vec<String>>;

    /// Raw entry bytes, or `None` when no entry exists.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::StoreUnavailable` if the backend cannot be read.
    fn read(&self, slug: &str, version: &Version, deadline: &Deadline) -> Result<Option<Vec<u8>>>;

    /// Atomically create the entry unless one already exists.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::StoreUnavailable` if the backend cannot be written.
    fn create_if_absent(
        &self,
        slug: &str,
        version: &Version,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<CreateOutcome>;
}

impl<B: SnapshotBackend + ?Sized> SnapshotBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn list(&self, slug: &str, deadline: &Deadline) -> Result<Vec<String>> {
        (**self).list(slug, deadline)
    }

    fn read(&self, slug: &str, version: &Version, deadline: &Deadline) -> Result<Option<Vec<u8>>> {
        (**self).read(slug, version, deadline)
    }

    fn create_if_absent(
        &self,
        slug: &str,
        version: &Version,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<CreateOutcome> {
        (**self).create_if_absent(slug, version, bytes, deadline)
    }
}
