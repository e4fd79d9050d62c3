//! Duplicate detection: fingerprint keys, grouping, and the scan engine.

pub mod engine;
pub mod fingerprint;

pub use engine::{scan, GroupingEngine, ScanConfig, ScanError};
pub use fingerprint::{
    DetectionMode, DuplicateGroup, Fingerprint, ScanResult, ScanSummary, SkipReason, SkippedPath,
};
