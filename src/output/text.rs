//! Human-readable text report.
//!
//! Numbered duplicate groups with their fingerprints and member paths,
//! followed by the skipped-paths section and a one-line summary. Group
//! membership within a group is arrival order.

use std::io;

use bytesize::ByteSize;
use chrono::{DateTime, Utc};

use crate::duplicates::{DetectionMode, ScanResult};

/// Text output formatter.
pub struct TextOutput<'a> {
    result: &'a ScanResult,
}

impl<'a> TextOutput<'a> {
    /// Create a new text formatter for a scan result.
    #[must_use]
    pub fn new(result: &'a ScanResult) -> Self {
        Self { result }
    }

    /// Write the report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        if self.result.groups.is_empty() {
            writeln!(writer, "No duplicates found ({} mode).", self.result.mode)?;
        } else {
            writeln!(writer, "Duplicate files ({} mode):", self.result.mode)?;
            if self.result.mode == DetectionMode::Metadata {
                writeln!(
                    writer,
                    "Note: metadata matches are heuristic; rerun with content hashing to verify."
                )?;
            }
            writeln!(writer)?;

            for (idx, group) in self.result.groups.iter().enumerate() {
                let key = match group.fingerprint.hash_hex() {
                    Some(hex) => format!("hash {hex}"),
                    None => {
                        let modified = group
                            .fingerprint
                            .modified()
                            .map(|t| DateTime::<Utc>::from(t).to_rfc3339())
                            .unwrap_or_else(|| "unknown".to_string());
                        format!("modified {modified}")
                    }
                };
                writeln!(
                    writer,
                    "[{}] {} files, {} each ({})",
                    idx + 1,
                    group.len(),
                    ByteSize(group.size()),
                    key
                )?;
                for path in &group.paths {
                    writeln!(writer, "    {}", path.display())?;
                }
                writeln!(writer)?;
            }
        }

        if !self.result.skipped.is_empty() {
            writeln!(writer, "Skipped paths:")?;
            for entry in &self.result.skipped {
                writeln!(
                    writer,
                    "    {} ({}: {})",
                    entry.path.display(),
                    entry.reason.stage(),
                    entry.reason
                )?;
            }
            writeln!(writer)?;
        }

        let summary = &self.result.summary;
        writeln!(
            writer,
            "Scanned {} files ({}) in {:.2}s: {} duplicate groups, {} redundant copies, {} reclaimable, {} skipped",
            summary.total_files,
            ByteSize(summary.total_size),
            summary.scan_duration.as_secs_f64(),
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display(),
            summary.skipped_files
        )?;

        Ok(())
    }

    /// Render the report as a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing to a Vec cannot fail
        self.write_to(&mut buffer).expect("in-memory write");
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
