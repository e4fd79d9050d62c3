//! Grouping engine: the scan orchestrator.
//!
//! # Overview
//!
//! The engine ties the pipeline together: the [`Walker`](crate::scanner::Walker)
//! enumerates candidates on demand, a bounded rayon pool probes (and
//! optionally hashes) them concurrently, and a single-threaded aggregator
//! owns the bucket map exclusively. Buckets with at least two members become
//! [`DuplicateGroup`]s; everything that failed along the way lands in the
//! skipped-paths audit channel.
//!
//! No per-file error ever aborts the scan. The only fatal condition is an
//! invalid root, rejected before any work begins. The scanned tree is never
//! mutated.
//!
//! # Concurrency
//!
//! Traversal is a single producer; `par_bridge` hands candidates to at most
//! `io_threads` workers, so hashing never blocks enumeration and disk
//! parallelism stays bounded. Because workers complete out of order, paths
//! within a bucket are in order of arrival at the aggregator rather than
//! discovery order — callers must not rely on either.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{GroupingEngine, ScanConfig};
//! use std::path::Path;
//!
//! let config = ScanConfig::default().with_verify_content(true);
//! let result = GroupingEngine::new(config).scan(Path::new("/data")).unwrap();
//!
//! for group in &result.groups {
//!     println!("{} copies of {} bytes", group.len(), group.size());
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::iter::{ParallelBridge, ParallelIterator};

use crate::progress::ProgressCallback;
use crate::scanner::{probe, FileCandidate, Hasher, Walker};

use super::{
    DetectionMode, DuplicateGroup, Fingerprint, ScanResult, ScanSummary, SkipReason, SkippedPath,
};

/// Fatal errors raised before a scan starts.
///
/// Everything else is recorded per-path and the scan continues.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The root path does not exist.
    #[error("Root path not found: {0}")]
    RootNotFound(PathBuf),

    /// The root path is not a directory.
    #[error("Root path is not a directory: {0}")]
    RootNotADirectory(PathBuf),
}

/// Configuration for the grouping engine.
#[derive(Clone)]
pub struct ScanConfig {
    /// Directory names pruned from the walk at any depth.
    pub excluded_dirs: Vec<String>,
    /// Verify duplicates by hashing full file content.
    ///
    /// When false, grouping uses the `(size, mtime)` heuristic, which
    /// carries a nonzero false-positive rate the caller opts into.
    pub verify_content: bool,
    /// Number of worker threads for probing and hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanConfig")
            .field("excluded_dirs", &self.excluded_dirs)
            .field("verify_content", &self.verify_content)
            .field("io_threads", &self.io_threads)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: Vec::new(),
            verify_content: false,
            io_threads: 4,
            progress_callback: None,
        }
    }
}

impl ScanConfig {
    /// Set the directory names to prune.
    #[must_use]
    pub fn with_excluded_dirs(mut self, names: Vec<String>) -> Self {
        self.excluded_dirs = names;
        self
    }

    /// Enable or disable content verification.
    #[must_use]
    pub fn with_verify_content(mut self, verify: bool) -> Self {
        self.verify_content = verify;
        self
    }

    /// Set the worker thread count (minimum 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// The detection mode this configuration produces.
    #[must_use]
    pub fn mode(&self) -> DetectionMode {
        if self.verify_content {
            DetectionMode::Content
        } else {
            DetectionMode::Metadata
        }
    }
}

/// Per-candidate outcome handed to the aggregator.
enum Outcome {
    Fingerprinted(PathBuf, Fingerprint),
    Skipped(SkippedPath),
}

/// Duplicate scan orchestrator.
pub struct GroupingEngine {
    config: ScanConfig,
    hasher: Hasher,
}

impl GroupingEngine {
    /// Create a new engine with the given configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
        }
    }

    /// Create a new engine with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ScanConfig::default())
    }

    /// Scan `root` for duplicate files.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if `root` does not exist or is not a
    /// directory. All other failures are per-path: the path is recorded in
    /// [`ScanResult::skipped`] and the scan continues.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        let start_time = std::time::Instant::now();

        if !root.exists() {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::RootNotADirectory(root.to_path_buf()));
        }

        log::info!(
            "Scanning {} ({} mode)",
            root.display(),
            self.config.mode()
        );

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_scan_start();
        }

        let walker = Walker::new(root, self.config.excluded_dirs.iter().cloned());
        let processed = AtomicUsize::new(0);

        // Bounded pool: traversal stays a single producer, probe/hash work
        // fans out to at most io_threads workers.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to create scan thread pool ({e}), using fallback");
                rayon::ThreadPoolBuilder::new().build().expect("thread pool")
            });

        let outcomes: Vec<Outcome> = pool.install(|| {
            walker
                .walk()
                .par_bridge()
                .map(|item| self.process(item, &processed))
                .collect()
        });

        let result = self.aggregate(outcomes, start_time.elapsed());

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_scan_end();
        }

        log::info!(
            "Scan complete: {} groups, {} redundant copies, {} reclaimable, {} skipped",
            result.summary.duplicate_groups,
            result.summary.duplicate_files,
            result.summary.reclaimable_display(),
            result.summary.skipped_files
        );

        Ok(result)
    }

    /// Fingerprint one candidate, or record why it was skipped.
    fn process(
        &self,
        item: Result<FileCandidate, crate::scanner::WalkError>,
        processed: &AtomicUsize,
    ) -> Outcome {
        let candidate = match item {
            Ok(candidate) => candidate,
            Err(e) => return Outcome::Skipped(SkippedPath::new(SkipReason::Walk(e))),
        };

        let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_file(count, candidate.path.to_string_lossy().as_ref());
        }

        let meta = match probe::probe(&candidate.path) {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("Skipping {}: {}", candidate.path.display(), e);
                return Outcome::Skipped(SkippedPath::new(SkipReason::Stat(e)));
            }
        };

        let fingerprint = if self.config.verify_content {
            match self.hasher.hash_file(&candidate.path) {
                Ok(hash) => Fingerprint::Content {
                    size: meta.size,
                    hash,
                },
                Err(e) => {
                    log::warn!("Skipping {}: {}", candidate.path.display(), e);
                    return Outcome::Skipped(SkippedPath::new(SkipReason::Read(e)));
                }
            }
        } else {
            Fingerprint::Metadata {
                size: meta.size,
                modified: meta.modified,
            }
        };

        Outcome::Fingerprinted(candidate.path, fingerprint)
    }

    /// Fold worker outcomes into the final result.
    ///
    /// Runs on the calling thread only; the bucket map has exactly one
    /// writer. Singleton buckets are dropped once the walk is exhausted.
    fn aggregate(&self, outcomes: Vec<Outcome>, duration: std::time::Duration) -> ScanResult {
        let mut buckets: HashMap<Fingerprint, Vec<PathBuf>> = HashMap::new();
        let mut skipped = Vec::new();
        let mut total_size = 0u64;
        let mut fingerprinted = 0usize;

        for outcome in outcomes {
            match outcome {
                Outcome::Fingerprinted(path, fingerprint) => {
                    fingerprinted += 1;
                    total_size += fingerprint.size();
                    buckets.entry(fingerprint).or_default().push(path);
                }
                Outcome::Skipped(entry) => skipped.push(entry),
            }
        }

        let mut groups: Vec<DuplicateGroup> = buckets
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(fingerprint, paths)| DuplicateGroup::new(fingerprint, paths))
            .collect();

        // Largest potential savings first; paths as tie-break for stable display
        groups.sort_by(|a, b| {
            b.size()
                .cmp(&a.size())
                .then_with(|| a.paths.cmp(&b.paths))
        });

        let summary = ScanSummary {
            total_files: fingerprinted + skipped.len(),
            total_size,
            duplicate_groups: groups.len(),
            duplicate_files: groups.iter().map(DuplicateGroup::duplicate_count).sum(),
            reclaimable_space: groups.iter().map(DuplicateGroup::wasted_space).sum(),
            skipped_files: skipped.len(),
            scan_duration: duration,
        };

        ScanResult {
            mode: self.config.mode(),
            groups,
            skipped,
            summary,
        }
    }
}

/// Scan `root` with an ad-hoc configuration.
///
/// Convenience wrapper over [`GroupingEngine`] for callers that do not need
/// a reusable engine.
///
/// # Errors
///
/// Returns [`ScanError`] for an invalid root; see [`GroupingEngine::scan`].
pub fn scan(
    root: &Path,
    excluded_dirs: &[String],
    verify_content: bool,
) -> Result<ScanResult, ScanError> {
    let config = ScanConfig::default()
        .with_excluded_dirs(excluded_dirs.to_vec())
        .with_verify_content(verify_content);
    GroupingEngine::new(config).scan(root)
}
