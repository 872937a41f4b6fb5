//! Two-phase flatten run: serial scan, then concurrent expansion and copy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, Instant};

use flatcopy_config::FlattenConfig;

use crate::error::CopyError;
use crate::expand::Expander;
use crate::guard::CopyGuard;
use crate::progress::ProgressSink;
use crate::scan::{excluded_path, scan_tree};

/// Summary of a finished flatten run.
#[derive(Debug, Default)]
pub struct FlattenReport {
    /// Files counted by the pre-scan.
    pub files_found: u64,
    /// Copy tasks that ran, successful or not.
    pub files_attempted: u64,
    /// Files copied without error.
    pub files_copied: u64,
    /// Bytes written by successful copies.
    pub bytes_copied: u64,
    /// Highest number of copies that were in flight at once.
    pub peak_in_flight: usize,
    /// Directories the pre-scan could not list.
    pub scan_errors: Vec<CopyError>,
    /// Subtrees and files that could not be copied.
    pub errors: Vec<CopyError>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

impl FlattenReport {
    /// Copy tasks that ran but failed.
    #[must_use]
    pub const fn files_failed(&self) -> u64 {
        self.files_attempted.saturating_sub(self.files_copied)
    }

    /// Whether every discovered file was copied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scan_errors.is_empty()
            && self.errors.is_empty()
            && self.files_copied == self.files_found
    }
}

/// Flatten every file beneath `root` into `root/<output_dir>`.
///
/// # Arguments
///
/// * `root` - Traversal root; relative paths and the output directory are resolved against it
/// * `config` - Run configuration
/// * `sink` - Receives the scanned total and one increment per finished copy
///
/// # Errors
///
/// * If `root` cannot be read
/// * If the output directory cannot be inspected or created
/// * If the worker pool cannot be started
///
/// Failures confined to a subtree or a single file are not errors; they are
/// logged and returned in [`FlattenReport::errors`].
pub fn flatten(
    root: &Path,
    config: &FlattenConfig,
    sink: &dyn ProgressSink,
) -> Result<FlattenReport, CopyError> {
    let started = Instant::now();

    fs::read_dir(root).map_err(|e| CopyError::ReadDirError {
        path: root.to_path_buf(),
        io_error: e,
    })?;

    // Phase 1: serial scan so the total is known before copying starts
    let scan = scan_tree(root, config.output_dir());
    log::info!("Found '{}' nested items to copy", scan.total_files);

    let output_path = excluded_path(root, config.output_dir());
    ensure_output_dir(&output_path)?;

    sink.set_total(scan.total_files);

    // Phase 2: concurrent expansion with bounded copies
    let guard = CopyGuard::new(config.max_concurrent());
    let threads = worker_threads(config.max_concurrent());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("flatcopy-worker-{i}"))
        .build()
        .map_err(|e| CopyError::ThreadPoolError {
            message: e.to_string(),
        })?;

    log::info!(
        "Using '{}' concurrent copies on '{threads}' worker threads",
        guard.capacity()
    );

    let expander = Expander::new(root, config, &guard, sink);
    pool.install(|| expander.run());
    let outcome = expander.finish();

    let report = FlattenReport {
        files_found: scan.total_files,
        files_attempted: outcome.files_attempted,
        files_copied: outcome.files_copied,
        bytes_copied: outcome.bytes_copied,
        peak_in_flight: guard.peak(),
        scan_errors: scan.errors,
        errors: outcome.errors,
        elapsed: started.elapsed(),
    };

    log::debug!(
        "Copied {}/{} files ({} bytes, peak {} in flight)",
        report.files_copied,
        report.files_found,
        report.bytes_copied,
        report.peak_in_flight
    );

    Ok(report)
}

/// Make sure `path` is a directory, creating it when absent.
///
/// # Errors
///
/// * If `path` cannot be inspected
/// * If `path` exists and is not a directory
/// * If `path` cannot be created
pub fn ensure_output_dir(path: &Path) -> Result<(), CopyError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CopyError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => create_output_dir(path),
        Err(e) => Err(CopyError::MetadataError {
            path: path.to_path_buf(),
            io_error: e,
        }),
    }
}

fn create_output_dir(path: &Path) -> Result<(), CopyError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }

    builder
        .create(path)
        .map_err(|e| CopyError::CreateDirError {
            path: path.to_path_buf(),
            io_error: e,
        })?;

    log::debug!("Created output directory {}", path.display());
    Ok(())
}

/// Worker threads per logical CPU the pool may grow to.
const THREADS_PER_CPU: usize = 4;

/// Worker threads for a run.
///
/// Never fewer than the logical CPUs, so directory tasks keep moving while
/// copy slots are taken, and never more than `THREADS_PER_CPU` per CPU.
/// The guard enforces `max_concurrent`; copies actually in flight are also
/// bounded by this thread count.
fn worker_threads(max_concurrent: usize) -> usize {
    let cpus = num_cpus::get().max(1);
    max_concurrent.min(cpus * THREADS_PER_CPU).max(cpus)
}
