//! Output formatters for scan results.
//!
//! Three encodings of the same [`ScanResult`](crate::duplicates::ScanResult):
//! - text for humans (stdout)
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! Every format names the detection mode that produced the result and
//! carries the skipped-paths section, so consumers can audit completeness.

pub mod csv;
pub mod json;
pub mod text;

// Re-export main types
pub use csv::CsvOutput;
pub use json::JsonOutput;
pub use text::TextOutput;
