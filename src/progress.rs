//! Progress reporting using indicatif.
//!
//! The engine reports through the [`ProgressCallback`] trait; [`Progress`]
//! is the terminal implementation used by the text output path. Other
//! consumers (JSON/CSV pipelines, tests) simply pass no callback.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for the scan.
///
/// All methods are called from worker threads; implementations must be
/// thread-safe.
pub trait ProgressCallback: Send + Sync {
    /// Called once when the scan starts.
    fn on_scan_start(&self);

    /// Called for each candidate as it is fingerprinted or skipped.
    ///
    /// # Arguments
    ///
    /// * `processed` - Number of candidates processed so far
    /// * `path` - Path currently being processed
    fn on_file(&self, processed: usize, path: &str);

    /// Called once when the scan ends.
    fn on_scan_end(&self);
}

/// Terminal spinner showing scan throughput.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl ProgressCallback for Progress {
    fn on_scan_start(&self) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style());
        pb.set_message("Scanning");
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_file(&self, processed: usize, path: &str) {
        if self.quiet {
            return;
        }

        if let Some(ref pb) = *self.bar.lock().unwrap() {
            pb.set_position(processed as u64);
            pb.set_message(truncate_path(path, 40));
        }
    }

    fn on_scan_end(&self) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }
}

/// Truncate a path for display, keeping the file name.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if file_name.len() >= max_len {
        return format!("...{}", &file_name[file_name.len() - max_len + 3..]);
    }

    format!(".../{file_name}")
}
