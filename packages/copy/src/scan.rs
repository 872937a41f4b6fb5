//! Synchronous pre-scan that counts the files a run will copy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::error::CopyError;

/// Outcome of a pre-scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Number of non-directory entries found beneath the root.
    pub total_files: u64,
    /// Directories that could not be listed (their files are not counted).
    pub errors: Vec<CopyError>,
}

/// Count every non-directory entry beneath `root`, skipping `root/output_dir`.
///
/// The walk is serial so the total is known before any copy starts.
/// Unreadable directories are logged and left out of the count; they never
/// fail the scan.
#[must_use]
pub fn scan_tree(root: &Path, output_dir: &Path) -> ScanReport {
    let excluded = excluded_path(root, output_dir);
    let pruned = excluded.clone();

    let walker = jwalk::WalkDir::new(root)
        .parallelism(jwalk::Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(false)
        .sort(false)
        .process_read_dir(move |_depth, _path, _state, children| {
            children.retain(|child| match child {
                Ok(entry) if entry.path() == pruned => {
                    log::debug!("Skipping output directory {}", pruned.display());
                    false
                }
                _ => true,
            });
        });

    let mut report = ScanReport::default();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_dir() {
                    report.total_files += 1;
                }
            }
            Err(e) => {
                let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                log::error!("Could not read entry {}, skipping: {e}", path.display());
                report.errors.push(CopyError::EnumerationError {
                    path,
                    message: e.to_string(),
                });
            }
        }
    }

    log::trace!(
        "Scanned {} (excluding {}): {} files",
        root.display(),
        excluded.display(),
        report.total_files
    );

    report
}

/// Count the files beneath `root`, skipping `root/output_dir`.
#[must_use]
pub fn count_files(root: &Path, output_dir: &Path) -> u64 {
    scan_tree(root, output_dir).total_files
}

/// Path of the output directory as seen from `root`.
pub(crate) fn excluded_path(root: &Path, output_dir: &Path) -> PathBuf {
    root.join(output_dir)
}
