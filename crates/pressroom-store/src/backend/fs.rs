//! Local filesystem backend
//!
//! Layout: `<root>/releases/<slug>/<major>.<minor>.<patch>.json`

use crate::backend::atomic::create_exclusive;
use crate::backend::{CreateOutcome, SnapshotBackend};
use crate::deadline::Deadline;
use crate::errors::{io_error, Result};
use crate::layout::{entry_version_name, slug_dir, snapshot_path};
use pressroom_core::model::Version;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem snapshot backend
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Create a backend rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SnapshotBackend for FsBackend {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    fn list(&self, slug: &str, deadline: &Deadline) -> Result<Vec<String>> {
        deadline.check("fs_list")?;

        let entries = match fs::read_dir(slug_dir(&self.root, slug)) {
            Ok(entries) => entries,
            // Never published
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("fs_list", e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("fs_list", e))?;
            if let Some(name) = entry.file_name().to_str().and_then(entry_version_name) {
                names.push(name.to_string());
            }
        }

        deadline.check("fs_list")?;
        Ok(names)
    }

    fn read(&self, slug: &str, version: &Version, deadline: &Deadline) -> Result<Option<Vec<u8>>> {
        deadline.check("fs_read")?;

        match fs::read(snapshot_path(&self.root, slug, version)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("fs_read", e)),
        }
    }

    fn create_if_absent(
        &self,
        slug: &str,
        version: &Version,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<CreateOutcome> {
        deadline.check("fs_create")?;
        create_exclusive(&snapshot_path(&self.root, slug, version), bytes)
    }
}
