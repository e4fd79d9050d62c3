//! JSON output formatter for scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "size": 1024,
//!       "hash": "abc123...",
//!       "modified": null,
//!       "paths": ["/path/to/file1.txt", "/path/to/file2.txt"]
//!     }
//!   ],
//!   "skipped": [
//!     {"path": "/path/to/locked.txt", "stage": "read", "reason": "Permission denied: ..."}
//!   ],
//!   "summary": {
//!     "mode": "content",
//!     "total_files": 100,
//!     "total_size": 1048576,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 10,
//!     "reclaimable_space": 51200,
//!     "skipped_files": 1,
//!     "scan_duration_ms": 1234,
//!     "exit_code": 3,
//!     "exit_code_name": "DS003"
//!   }
//! }
//! ```
//!
//! `hash` is present for content-mode groups, `modified` (RFC 3339) for
//! metadata-mode groups.

use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::duplicates::{DetectionMode, DuplicateGroup, ScanResult, SkippedPath};
use crate::error::ExitCode;

/// A single duplicate group in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Per-member file size in bytes
    pub size: u64,
    /// Content hash as hexadecimal (content mode only)
    pub hash: Option<String>,
    /// Shared modification time, RFC 3339 (metadata mode only)
    pub modified: Option<String>,
    /// Member paths in arrival order
    pub paths: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Convert a duplicate group.
    #[must_use]
    pub fn from_group(group: &DuplicateGroup) -> Self {
        Self {
            size: group.size(),
            hash: group.fingerprint.hash_hex(),
            modified: group
                .fingerprint
                .modified()
                .map(|t| DateTime::<Utc>::from(t).to_rfc3339()),
            paths: group
                .paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// A skipped path in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSkippedPath {
    /// The path that was skipped
    pub path: String,
    /// Which stage rejected it ("walk", "stat", "read")
    pub stage: String,
    /// Human-readable reason
    pub reason: String,
}

impl JsonSkippedPath {
    /// Convert a skipped-path record.
    #[must_use]
    pub fn from_skipped(entry: &SkippedPath) -> Self {
        Self {
            path: entry.path.to_string_lossy().into_owned(),
            stage: entry.reason.stage().to_string(),
            reason: entry.reason.to_string(),
        }
    }
}

/// Summary statistics in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Detection mode used for grouping
    pub mode: DetectionMode,
    /// Candidates processed (fingerprinted plus skipped)
    pub total_files: usize,
    /// Total bytes across fingerprinted files
    pub total_size: u64,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups (originals excluded)
    pub duplicate_files: usize,
    /// Space reclaimable by keeping one copy per group (bytes)
    pub reclaimable_space: u64,
    /// Paths skipped due to errors
    pub skipped_files: usize,
    /// Scan duration in milliseconds
    pub scan_duration_ms: u64,
    /// Process exit code number
    pub exit_code: i32,
    /// Machine-readable exit code name (e.g. "DS000")
    pub exit_code_name: String,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Skipped-paths audit channel
    pub skipped: Vec<JsonSkippedPath>,
    /// Scan summary
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON view of a scan result.
    #[must_use]
    pub fn new(result: &ScanResult, exit_code: ExitCode) -> Self {
        Self {
            duplicates: result.groups.iter().map(JsonDuplicateGroup::from_group).collect(),
            skipped: result
                .skipped
                .iter()
                .map(JsonSkippedPath::from_skipped)
                .collect(),
            summary: JsonSummary {
                mode: result.mode,
                total_files: result.summary.total_files,
                total_size: result.summary.total_size,
                duplicate_groups: result.summary.duplicate_groups,
                duplicate_files: result.summary.duplicate_files,
                reclaimable_space: result.summary.reclaimable_space,
                skipped_files: result.summary.skipped_files,
                scan_duration_ms: result.summary.scan_duration.as_millis() as u64,
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
        }
    }

    /// Serialize as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to the given writer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        let json = self.to_json_pretty().map_err(io::Error::other)?;
        writeln!(writer, "{json}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::{Fingerprint, ScanSummary, SkipReason};
    use crate::scanner::ReadError;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn content_result() -> ScanResult {
        ScanResult {
            mode: DetectionMode::Content,
            groups: vec![DuplicateGroup::new(
                Fingerprint::Content {
                    size: 2,
                    hash: [0x01; 32],
                },
                vec![PathBuf::from("/d/a.txt"), PathBuf::from("/d/b.txt")],
            )],
            skipped: vec![crate::duplicates::SkippedPath::new(SkipReason::Read(
                ReadError::PermissionDenied(PathBuf::from("/d/locked.txt")),
            ))],
            summary: ScanSummary {
                total_files: 3,
                total_size: 6,
                duplicate_groups: 1,
                duplicate_files: 1,
                reclaimable_space: 2,
                skipped_files: 1,
                scan_duration: Duration::from_millis(10),
            },
        }
    }

    #[test]
    fn test_json_output_schema() {
        let result = content_result();
        let output = JsonOutput::new(&result, ExitCode::PartialSuccess);
        let json = output.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["mode"], "content");
        assert_eq!(value["summary"]["exit_code"], 3);
        assert_eq!(value["summary"]["exit_code_name"], "DS003");
        assert_eq!(value["duplicates"][0]["size"], 2);
        assert_eq!(
            value["duplicates"][0]["hash"],
            "01".repeat(32)
        );
        assert!(value["duplicates"][0]["modified"].is_null());
        assert_eq!(value["duplicates"][0]["paths"][0], "/d/a.txt");
        assert_eq!(value["skipped"][0]["stage"], "read");
        assert_eq!(value["skipped"][0]["path"], "/d/locked.txt");
    }

    #[test]
    fn test_json_metadata_group_has_modified() {
        let result = ScanResult {
            mode: DetectionMode::Metadata,
            groups: vec![DuplicateGroup::new(
                Fingerprint::Metadata {
                    size: 4,
                    modified: SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000),
                },
                vec![PathBuf::from("/x"), PathBuf::from("/y")],
            )],
            skipped: Vec::new(),
            summary: ScanSummary::default(),
        };

        let output = JsonOutput::new(&result, ExitCode::Success);
        let value: serde_json::Value =
            serde_json::from_str(&output.to_json().unwrap()).unwrap();

        assert_eq!(value["summary"]["mode"], "metadata");
        assert!(value["duplicates"][0]["hash"].is_null());
        assert!(value["duplicates"][0]["modified"]
            .as_str()
            .unwrap()
            .starts_with("2020-09-13"));
    }

    #[test]
    fn test_json_pretty_parses() {
        let result = content_result();
        let output = JsonOutput::new(&result, ExitCode::Success);
        let pretty = output.to_json_pretty().unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&pretty).is_ok());
    }
}
