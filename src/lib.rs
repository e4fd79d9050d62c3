//! dupescan - Duplicate File Scanner
//!
//! A one-shot scan-and-report engine for finding duplicate files. Files are
//! grouped by a composite fingerprint: size and modification time for the
//! cheap tier, or size and full-content BLAKE3 hash for the authoritative
//! tier. Per-path failures are collected in an audit channel instead of
//! aborting the scan.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::scan;
//! use std::path::Path;
//!
//! let result = scan(Path::new("/data"), &[".git".to_string()], true).unwrap();
//! for group in &result.groups {
//!     println!("{} copies of {} bytes:", group.len(), group.size());
//!     for path in &group.paths {
//!         println!("  {}", path.display());
//!     }
//! }
//! println!("{} paths skipped", result.skipped.len());
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

pub use app::run_app;
