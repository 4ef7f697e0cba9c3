//! Persisted key layout
//!
//! Every backend stores a snapshot under `releases/<slug>/<version>.json`,
//! as a path below the filesystem root or as the object name in a bucket.

use pressroom_core::model::Version;
use std::path::{Path, PathBuf};

pub const RELEASES_DIR: &str = "releases";
pub const SNAPSHOT_EXTENSION: &str = "json";

/// Key prefix shared by every snapshot of `slug`, with trailing `/`
pub fn slug_prefix(slug: &str) -> String {
    format!("{}/{}/", RELEASES_DIR, slug)
}

/// For slug "home" and 1.2.0, returns "releases/home/1.2.0.json"
pub fn snapshot_key(slug: &str, version: &Version) -> String {
    format!("{}{}.{}", slug_prefix(slug), version, SNAPSHOT_EXTENSION)
}

/// Directory holding the snapshots of `slug` below a filesystem root
pub fn slug_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(RELEASES_DIR).join(slug)
}

pub fn snapshot_path(root: &Path, slug: &str, version: &Version) -> PathBuf {
    slug_dir(root, slug).join(format!("{}.{}", version, SNAPSHOT_EXTENSION))
}

/// Version identifier of an entry name such as `1.2.0.json`
///
/// Hidden entries (in-flight temp files) and names without the snapshot
/// extension are not entries. The identifier is returned unparsed.
pub fn entry_version_name(entry_name: &str) -> Option<&str> {
    if entry_name.starts_with('.') {
        return None;
    }
    let stem = entry_name.strip_suffix(SNAPSHOT_EXTENSION)?.strip_suffix('.')?;
    (!stem.is_empty()).then_some(stem)
}
