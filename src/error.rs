//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::ScanResult;

/// Exit codes for the dupescan binary.
///
/// - 0: Success (completed normally, duplicates found)
/// - 1: General error (unexpected failure, invalid root)
/// - 2: No duplicates found (completed normally)
/// - 3: Partial success (completed, but some paths were skipped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: scan completed and duplicates were found.
    Success = 0,
    /// General error: an unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// Partial success: scan completed but some paths were skipped.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::NoDuplicates => "DS002",
            Self::PartialSuccess => "DS003",
        }
    }

    /// Derive the exit code for a completed scan.
    ///
    /// Skipped paths take precedence so callers auditing completeness can
    /// detect them without parsing the report.
    #[must_use]
    pub fn from_scan(result: &ScanResult) -> Self {
        if result.has_skipped() {
            Self::PartialSuccess
        } else if result.has_duplicates() {
            Self::Success
        } else {
            Self::NoDuplicates
        }
    }
}

/// Structured error information for JSON error output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g. "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
        }
    }
}
