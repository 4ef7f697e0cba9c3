//! Atomic exclusive create
//!
//! Content is staged in a uniquely named temp file in the target directory,
//! then hard-linked into place. The link fails if the target exists, so a
//! reader never sees a partial file and two writers never both succeed.

use crate::backend::CreateOutcome;
use crate::errors::{io_error, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

fn temp_path_for(target_path: &Path) -> PathBuf {
    let file_name = target_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target_path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::now_v7()))
}

fn stage(temp_path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp_path)?;
    file.write_all(content)?;
    file.sync_all()
}

/// Write `content` to `target_path` only if nothing is there yet
pub fn create_exclusive(target_path: &Path, content: &[u8]) -> Result<CreateOutcome> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_snapshot_dir", e))?;
    }

    let temp_path = temp_path_for(target_path);
    if let Err(e) = stage(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("write_snapshot_temp", e));
    }

    let linked = fs::hard_link(&temp_path, target_path);
    // The temp name is ours alone; failing to remove it leaves a hidden file
    // that listings skip
    let _ = fs::remove_file(&temp_path);

    match linked {
        Ok(()) => Ok(CreateOutcome::Created),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(CreateOutcome::AlreadyExists),
        Err(e) => Err(io_error("link_snapshot", e)),
    }
}
