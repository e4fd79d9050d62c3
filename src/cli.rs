//! Command-line interface definitions.
//!
//! Thin glue over the library: all flags map directly onto
//! [`ScanConfig`](crate::duplicates::ScanConfig) fields or an output
//! format choice. No scan semantics live here.
//!
//! # Example
//!
//! ```bash
//! # Cheap metadata-only scan
//! dupescan scan ~/Downloads
//!
//! # Authoritative content-hash scan with JSON output
//! dupescan scan ~/Downloads --hash --output json
//!
//! # Prune directories by name, at any depth
//! dupescan scan ~/src --exclude .git --exclude target
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Duplicate file scanner.
///
/// Groups files sharing a size/mtime fingerprint, optionally verified by a
/// full BLAKE3 content hash. Read-only: the scanned tree is never modified.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors and the report itself
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory tree for duplicate files
    Scan(ScanArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Root directory to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Directory name to prune at any depth (can be repeated)
    #[arg(short = 'x', long = "exclude", value_name = "NAME")]
    pub exclude_dirs: Vec<String>,

    /// Verify duplicates by hashing full file content (BLAKE3)
    ///
    /// Without this flag, grouping uses size and modification time only:
    /// fast, but two different files can coincidentally share both.
    #[arg(long)]
    pub hash: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Number of worker threads for probing and hashing
    ///
    /// Lower values reduce disk thrashing on HDDs. Defaults to the
    /// configured value (4 if unset).
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,
}

/// Report encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Machine-readable JSON
    Json,
    /// One CSV row per duplicate file
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_args_parse() {
        let cli = Cli::parse_from([
            "dupescan", "scan", "/tmp", "-x", ".git", "--exclude", "target", "--hash",
            "--output", "json",
        ]);

        let Commands::Scan(args) = cli.command;
        assert_eq!(args.path, PathBuf::from("/tmp"));
        assert_eq!(args.exclude_dirs, vec![".git", "target"]);
        assert!(args.hash);
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.io_threads, None);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dupescan", "scan", "."]);

        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        let Commands::Scan(args) = cli.command;
        assert!(!args.hash);
        assert_eq!(args.output, OutputFormat::Text);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["dupescan", "-v", "-q", "scan", "."]);
        assert!(result.is_err());
    }
}
