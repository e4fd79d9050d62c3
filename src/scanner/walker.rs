//! Directory walker producing candidate files for duplicate detection.
//!
//! # Overview
//!
//! The [`Walker`] enumerates every regular file under a root directory as a
//! lazy iterator, pruning a caller-supplied set of directory names at any
//! depth. It is the single producer of the scan pipeline: downstream probing
//! and hashing run on worker threads, traversal does not.
//!
//! # Behavior
//!
//! - Excluded directories are matched by *name*, not full path, and their
//!   entire subtree is skipped.
//! - Symbolic links to directories are never followed (prevents cycles).
//!   Symbolic links to regular files are yielded as-is.
//! - A directory that cannot be opened yields a [`WalkError`] item and the
//!   walk continues; the unreachable subtree is simply absent.
//! - Ordering depends on the underlying directory enumeration and is not
//!   guaranteed to be stable across runs.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user"), [".git".to_string()]);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(candidate) => println!("{}", candidate.path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{FileCandidate, WalkError};

/// Recursive file discovery with by-name directory pruning.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Directory names pruned at any depth
    excluded: HashSet<OsString>,
}

impl Walker {
    /// Create a new walker for the given root.
    ///
    /// # Arguments
    ///
    /// * `root` - Root directory to enumerate
    /// * `excluded` - Directory names to prune entirely, at any depth
    #[must_use]
    pub fn new<I, S>(root: &Path, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            root: root.to_path_buf(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a directory entry should be descended into.
    ///
    /// The root itself (depth 0) is never pruned, even when its own name is
    /// in the excluded set.
    fn keep_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        if self.excluded.contains(entry.file_name()) {
            log::debug!("Pruning excluded directory: {}", entry.path().display());
            return false;
        }
        true
    }

    /// Classify a non-directory entry, yielding a candidate for regular
    /// files and file-symlinks only.
    fn classify(&self, entry: &DirEntry) -> Option<FileCandidate> {
        let file_type = entry.file_type();

        if file_type.is_file() {
            return Some(FileCandidate::new(entry.path().to_path_buf()));
        }

        if file_type.is_symlink() {
            // Follow one level to find out what the link points at. Links to
            // directories are not traversed; links to regular files are
            // yielded under the link path.
            return match std::fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => {
                    Some(FileCandidate::new(entry.path().to_path_buf()))
                }
                Ok(_) => {
                    log::trace!("Skipping symlink to non-file: {}", entry.path().display());
                    None
                }
                Err(e) => {
                    log::debug!("Skipping broken symlink {}: {}", entry.path().display(), e);
                    None
                }
            };
        }

        // Fifos, sockets, devices
        log::trace!("Skipping non-regular entry: {}", entry.path().display());
        None
    }

    /// Convert a walkdir error into a recorded [`WalkError`].
    fn handle_walk_error(&self, error: walkdir::Error) -> WalkError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        let permission_denied = error
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied);

        log::warn!("Cannot enter {}: {}", path.display(), error);

        if permission_denied {
            WalkError::PermissionDenied(path)
        } else {
            WalkError::Io {
                path,
                source: error
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory enumeration failed")),
            }
        }
    }

    /// Walk the tree, yielding file candidates and per-directory errors.
    ///
    /// Errors are yielded as [`WalkError`] values rather than stopping
    /// iteration, so one unreadable directory never aborts the walk.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileCandidate, WalkError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| self.keep_entry(entry))
            .filter_map(move |result| match result {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        return None;
                    }
                    self.classify(&entry).map(Ok)
                }
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }
}
