//! CSV output formatter for scan results.
//!
//! One row per duplicate file, for spreadsheet import and data analysis.
//!
//! # Columns
//!
//! - `group_id`: numeric ID of the duplicate group (1-based)
//! - `size`: file size in bytes
//! - `modified`: last modified time (RFC 3339)
//! - `hash`: content hash (hexadecimal, empty in metadata mode)
//! - `path`: path to the file

use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::duplicates::ScanResult;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow {
    group_id: usize,
    size: u64,
    modified: String,
    hash: String,
    path: String,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    result: &'a ScanResult,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV formatter for a scan result.
    #[must_use]
    pub fn new(result: &'a ScanResult) -> Self {
        Self { result }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for (idx, group) in self.result.groups.iter().enumerate() {
            let hash = group.fingerprint.hash_hex().unwrap_or_default();
            let shared_modified = group
                .fingerprint
                .modified()
                .map(|t| DateTime::<Utc>::from(t).to_rfc3339());

            for path in &group.paths {
                // Content-mode groups share no mtime; stat at render time
                let modified = shared_modified
                    .clone()
                    .unwrap_or_else(|| stat_modified_time(path));

                csv_writer.serialize(CsvRow {
                    group_id: idx + 1,
                    size: group.size(),
                    modified,
                    hash: hash.clone(),
                    path: path.to_string_lossy().into_owned(),
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn render(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Formatted modification time for a file, "unknown" if unreadable.
fn stat_modified_time(path: &std::path::Path) -> String {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|m| DateTime::<Utc>::from(m).to_rfc3339())
        .unwrap_or_else(|_| "unknown".to_string())
}
