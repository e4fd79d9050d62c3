//! Metadata prober: one stat call per candidate path.
//!
//! Produces the lightweight `(size, mtime)` fingerprint used as the cheap
//! grouping key. A candidate may vanish or change between enumeration and
//! probing; any failure here is a [`StatError`] the caller records and skips.

use std::path::Path;
use std::time::SystemTime;

use super::{stat_error_from_io, StatError};

/// Size and modification time of a regular file, at the precision the
/// underlying filesystem exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

/// Stat a single path.
///
/// Symlinks are followed (the kernel's loop detection covers redirection
/// cycles). Filesystems that expose no modification time degrade to a
/// [`StatError::NoModificationTime`] skip rather than a fabricated
/// timestamp, which would silently merge unrelated files in metadata-only
/// grouping.
///
/// # Errors
///
/// Returns [`StatError`] when the path no longer exists, is inaccessible,
/// or is not a regular file. Failures are permanent for the scan; there is
/// no retry.
pub fn probe(path: &Path) -> Result<FileMeta, StatError> {
    let metadata = std::fs::metadata(path).map_err(|e| stat_error_from_io(path, e))?;

    if !metadata.is_file() {
        return Err(StatError::NotARegularFile(path.to_path_buf()));
    }

    let modified = metadata.modified().map_err(|e| {
        log::warn!("No modification time for {}: {}", path.display(), e);
        StatError::NoModificationTime(path.to_path_buf())
    })?;

    Ok(FileMeta {
        size: metadata.len(),
        modified,
    })
}
