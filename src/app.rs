//! Application driver: wires CLI arguments, config, engine, and formatters.

use std::sync::Arc;

use anyhow::Context;

use crate::cli::{Cli, Commands, OutputFormat, ScanArgs};
use crate::config::Config;
use crate::duplicates::{GroupingEngine, ScanConfig};
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonOutput, TextOutput};
use crate::progress::{Progress, ProgressCallback};

/// Run the application and return the process exit code.
///
/// # Errors
///
/// Returns an error for fatal conditions only (invalid root, unwritable
/// stdout); per-path scan failures are reported, not raised.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Scan(ref args) => run_scan(args, cli.quiet),
    }
}

fn run_scan(args: &ScanArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    let config = Config::load();

    // CLI excludes extend the configured set; explicit thread count wins
    let mut exclude_dirs = config.exclude_dirs.clone();
    exclude_dirs.extend(args.exclude_dirs.iter().cloned());
    let io_threads = args.io_threads.unwrap_or(config.io_threads);

    let mut scan_config = ScanConfig::default()
        .with_excluded_dirs(exclude_dirs)
        .with_verify_content(args.hash)
        .with_io_threads(io_threads);

    // Spinner only for interactive text output; structured outputs stay clean
    if args.output == OutputFormat::Text {
        let progress: Arc<dyn ProgressCallback> = Arc::new(Progress::new(quiet));
        scan_config = scan_config.with_progress_callback(progress);
    }

    let result = GroupingEngine::new(scan_config)
        .scan(&args.path)
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    let exit_code = ExitCode::from_scan(&result);
    let stdout = std::io::stdout();

    match args.output {
        OutputFormat::Text => TextOutput::new(&result)
            .write_to(stdout.lock())
            .context("Failed to write text report")?,
        OutputFormat::Json => JsonOutput::new(&result, exit_code)
            .write_to(stdout.lock())
            .context("Failed to write JSON report")?,
        OutputFormat::Csv => CsvOutput::new(&result)
            .write_to(stdout.lock())
            .context("Failed to write CSV report")?,
    }

    Ok(exit_code)
}
