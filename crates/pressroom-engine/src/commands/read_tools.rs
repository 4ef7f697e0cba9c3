//! Read-side tools: latest, show, history and diff preview.
//!
//! None of these consult the publish gate; reading published snapshots is
//! open to every role.

use pressroom_core::diff::{diff, DiffResult};
use pressroom_core::errors::{ExErrorKind, Result};
use pressroom_core::model::{Document, Version};
use pressroom_core::rules::validate_for_publish;
use pressroom_core::semver::{apply_bump, bump_class, BumpClass};
use pressroom_core::{log_op_end, log_op_error, log_op_start};
use pressroom_store::{Snapshot, SnapshotStore};
use serde::Serialize;

/// What publishing a draft would change, computed without writing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffPreview {
    pub slug: String,
    /// Latest published version, 0.0.0 if none
    pub base_version: Version,
    pub next_version: Version,
    pub bump: BumpClass,
    pub diff: DiffResult,
}

/// Version history of one slug
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History {
    pub slug: String,
    /// Ascending
    pub versions: Vec<Version>,
}

fn observed<T>(op: &'static str, slug: &str, run: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op, slug = %slug);
    let start = std::time::Instant::now();

    let value = run().map_err(|e| {
        log_op_error!(op, e, duration_ms = start.elapsed().as_millis() as u64, slug = %slug);
        e
    })?;

    log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64, slug = %slug);
    Ok(value)
}

/// ## Errors
///
/// `NotFound` if nothing was published under `slug`, `StoreUnavailable` on
/// backend failure.
pub fn latest(store: &SnapshotStore, slug: &str) -> Result<Snapshot> {
    observed("latest", slug, || store.get_latest(slug))
}

/// ## Errors
///
/// `NotFound` if `(slug, version)` does not exist, `StoreUnavailable` on
/// backend failure.
pub fn show(store: &SnapshotStore, slug: &str, version: &Version) -> Result<Snapshot> {
    observed("show", slug, || store.get(slug, version))
}

/// ## Errors
///
/// `StoreUnavailable` on backend failure. An unknown slug has an empty
/// history.
pub fn history(store: &SnapshotStore, slug: &str) -> Result<History> {
    observed("history", slug, || {
        Ok(History {
            slug: slug.to_string(),
            versions: store.history(slug)?,
        })
    })
}

/// Diff `candidate` against the latest snapshot of `slug`.
///
/// The candidate passes the same validation gate as a publish, before the
/// store is read.
///
/// ## Errors
///
/// `Validation` if the candidate is malformed, `StoreUnavailable` on backend
/// failure, `VersionOverflow` if the next version does not fit.
pub fn diff_preview(store: &SnapshotStore, slug: &str, candidate: &Document) -> Result<DiffPreview> {
    observed("diff_preview", slug, || {
        validate_for_publish(slug, candidate)?;

        let (previous_document, base_version) = match store.get_latest(slug) {
            Ok(snapshot) => (snapshot.document, snapshot.version),
            Err(e) if e.kind() == ExErrorKind::NotFound => (Document::empty(), Version::INITIAL),
            Err(e) => return Err(e),
        };

        let changes = diff(candidate, &previous_document);
        let bump = bump_class(&changes);
        Ok(DiffPreview {
            slug: slug.to_string(),
            base_version,
            next_version: apply_bump(base_version, bump)?,
            bump,
            diff: changes,
        })
    })
}
