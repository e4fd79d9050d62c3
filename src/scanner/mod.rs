//! Scanner module for directory traversal, metadata probing, and hashing.
//!
//! This module provides the three leaf components of the detection pipeline:
//! - [`walker`]: recursive file discovery with directory pruning
//! - [`probe`]: single-stat metadata fingerprinting
//! - [`hasher`]: streaming BLAKE3 content hashing
//!
//! Each component fails per-path, never per-scan: errors are returned as
//! values so the caller can record the path and move on.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{probe, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), ["node_modules".to_string()]);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(candidate) => match probe::probe(&candidate.path) {
//!             Ok(meta) => println!("{}: {} bytes", candidate.path.display(), meta.size),
//!             Err(e) => eprintln!("Warning: {}", e),
//!         },
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod probe;
pub mod walker;

use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher, CHUNK_SIZE};
pub use probe::FileMeta;
pub use walker::Walker;

/// A path known to refer to a regular file at enumeration time.
///
/// Candidates are ephemeral: the walker produces them, the grouping engine
/// consumes them exactly once. The file may vanish or change between
/// enumeration and probing; the prober reports that as a [`StatError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Path to the file (the link path for symlinked files)
    pub path: PathBuf,
}

impl FileCandidate {
    /// Create a new candidate for the given path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Errors from directory enumeration.
///
/// A `WalkError` marks a subtree the walk could not enter. It is recorded
/// and the walk continues; the affected subtree is simply absent from the
/// results.
#[derive(thiserror::Error, Debug)]
pub enum WalkError {
    /// Permission was denied when opening a directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while enumerating a directory.
    #[error("Walk error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl WalkError {
    /// The path the error is attached to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(path) | Self::Io { path, .. } => path,
        }
    }
}

/// Errors from metadata probing.
///
/// Raised when a path vanished or became inaccessible between discovery and
/// probing. The caller skips the path and continues; probe failures are
/// treated as permanent for the scan, so there is no retry.
#[derive(thiserror::Error, Debug)]
pub enum StatError {
    /// The path no longer exists.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when stating the path.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path does not refer to a regular file.
    #[error("Not a regular file: {0}")]
    NotARegularFile(PathBuf),

    /// The filesystem exposes no usable modification time for the path.
    #[error("No modification time available: {0}")]
    NoModificationTime(PathBuf),

    /// An I/O error occurred while stating the path.
    #[error("Stat error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl StatError {
    /// The path the error is attached to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path)
            | Self::PermissionDenied(path)
            | Self::NotARegularFile(path)
            | Self::NoModificationTime(path)
            | Self::Io { path, .. } => path,
        }
    }
}

/// Errors from content hashing.
///
/// Any failure mid-stream discards the partial digest; a partial hash is
/// never reported as valid.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The file no longer exists.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("Read error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// The path the error is attached to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) | Self::Io { path, .. } => path,
        }
    }
}

/// Map an I/O error to a `StatError` by kind.
pub(crate) fn stat_error_from_io(path: &Path, error: std::io::Error) -> StatError {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::NotFound => StatError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => StatError::PermissionDenied(path.to_path_buf()),
        _ => StatError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

/// Map an I/O error to a `ReadError` by kind.
pub(crate) fn read_error_from_io(path: &Path, error: std::io::Error) -> ReadError {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => ReadError::PermissionDenied(path.to_path_buf()),
        _ => ReadError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
