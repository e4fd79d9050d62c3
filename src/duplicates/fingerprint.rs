//! Fingerprint keys, duplicate groups, and scan results.
//!
//! # Overview
//!
//! A [`Fingerprint`] is the composite equality key that decides whether two
//! files are considered duplicates. It comes in two tiers:
//!
//! - **Metadata**: `(size, mtime)`. Cheap (no file reads) but heuristic —
//!   two unrelated files can coincidentally share size and modification
//!   time, and a touched copy of an identical file will not match. Callers
//!   opt into this lower-confidence tier explicitly.
//! - **Content**: `(size, content hash)`. The authoritative check: equal
//!   256-bit digests over the full byte content. Modification time does not
//!   participate, so byte-identical files group together no matter when they
//!   were written.
//!
//! Fingerprint equality is value equality over all populated fields. The
//! [`ScanResult`] records which tier produced it so consumers can judge the
//! confidence of the grouping.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::scanner::{hash_to_hex, Hash, ReadError, StatError, WalkError};

/// Which equality tier a scan used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMode {
    /// Group by `(size, mtime)` only. Fast, nonzero false-positive rate.
    Metadata,
    /// Group by `(size, content hash)`. Authoritative.
    Content,
}

impl DetectionMode {
    /// Stable lowercase name, used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Content => "content",
        }
    }
}

impl std::fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite equality key for duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    /// Metadata tier: size and modification time.
    Metadata {
        /// File size in bytes
        size: u64,
        /// Last modification time
        modified: SystemTime,
    },
    /// Content tier: size and full-content digest.
    Content {
        /// File size in bytes
        size: u64,
        /// BLAKE3 hash of the entire file content
        hash: Hash,
    },
}

impl Fingerprint {
    /// File size shared by every member of the group.
    #[must_use]
    pub fn size(&self) -> u64 {
        match self {
            Self::Metadata { size, .. } | Self::Content { size, .. } => *size,
        }
    }

    /// Modification time, when the metadata tier produced this key.
    #[must_use]
    pub fn modified(&self) -> Option<SystemTime> {
        match self {
            Self::Metadata { modified, .. } => Some(*modified),
            Self::Content { .. } => None,
        }
    }

    /// Content hash, when the content tier produced this key.
    #[must_use]
    pub fn content_hash(&self) -> Option<&Hash> {
        match self {
            Self::Metadata { .. } => None,
            Self::Content { hash, .. } => Some(hash),
        }
    }

    /// Content hash as a hexadecimal string, when present.
    #[must_use]
    pub fn hash_hex(&self) -> Option<String> {
        self.content_hash().map(hash_to_hex)
    }

    /// The tier this key belongs to.
    #[must_use]
    pub fn mode(&self) -> DetectionMode {
        match self {
            Self::Metadata { .. } => DetectionMode::Metadata,
            Self::Content { .. } => DetectionMode::Content,
        }
    }
}

/// A set of paths sharing one Fingerprint.
///
/// Invariant: every group surfaced in a [`ScanResult`] has at least two
/// members; singleton buckets are discarded before the result is built.
/// Paths appear in order of arrival at the aggregator, which under the
/// worker pool may differ from walk-discovery order.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// The shared equality key
    pub fingerprint: Fingerprint,
    /// Member paths, in arrival order
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new group.
    #[must_use]
    pub fn new(fingerprint: Fingerprint, paths: Vec<PathBuf>) -> Self {
        Self { fingerprint, paths }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Per-member file size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.fingerprint.size()
    }

    /// Number of redundant copies (total minus one original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Space reclaimable by keeping a single copy.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size() * self.duplicate_count() as u64
    }
}

/// Why a path was left out of the grouping.
///
/// Wraps the per-stage error taxonomy so the audit channel can report which
/// stage rejected the path.
#[derive(thiserror::Error, Debug)]
pub enum SkipReason {
    /// A directory could not be entered during the walk.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// The metadata probe failed.
    #[error(transparent)]
    Stat(#[from] StatError),

    /// Content hashing failed mid-stream.
    #[error(transparent)]
    Read(#[from] ReadError),
}

impl SkipReason {
    /// The path the underlying error is attached to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Walk(e) => e.path(),
            Self::Stat(e) => e.path(),
            Self::Read(e) => e.path(),
        }
    }

    /// Stable name of the failing stage, used in reports.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Walk(_) => "walk",
            Self::Stat(_) => "stat",
            Self::Read(_) => "read",
        }
    }
}

/// One entry in the skipped-paths audit channel.
#[derive(Debug)]
pub struct SkippedPath {
    /// The path that was skipped
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: SkipReason,
}

impl SkippedPath {
    /// Record a skip, taking the path from the underlying error.
    #[must_use]
    pub fn new(reason: SkipReason) -> Self {
        Self {
            path: reason.path().to_path_buf(),
            reason,
        }
    }
}

/// Summary statistics for one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Candidates processed (fingerprinted plus skipped)
    pub total_files: usize,
    /// Total bytes across all fingerprinted files
    pub total_size: u64,
    /// Number of duplicate groups in the result
    pub duplicate_groups: usize,
    /// Number of redundant copies across all groups (originals excluded)
    pub duplicate_files: usize,
    /// Space reclaimable by keeping one copy per group
    pub reclaimable_space: u64,
    /// Paths skipped due to errors
    pub skipped_files: usize,
    /// Wall-clock duration of the scan
    pub scan_duration: std::time::Duration,
}

impl ScanSummary {
    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        bytesize::ByteSize(self.reclaimable_space).to_string()
    }
}

/// The complete outcome of one scan.
///
/// Immutable once built; has no relation to any previous or future scan.
/// `skipped` is the audit channel: a caller can always distinguish "grouped
/// as duplicates" from "left out due to errors".
#[derive(Debug)]
pub struct ScanResult {
    /// The equality tier that produced the groups
    pub mode: DetectionMode,
    /// Duplicate groups, each with at least two members
    pub groups: Vec<DuplicateGroup>,
    /// Paths excluded from grouping, with reasons
    pub skipped: Vec<SkippedPath>,
    /// Aggregate statistics
    pub summary: ScanSummary,
}

impl ScanResult {
    /// Whether any duplicates were found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Whether any paths were skipped due to errors.
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
