//! Concurrent recursive expansion of the source tree.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use flatcopy_config::FlattenConfig;

use crate::copy::stream_file;
use crate::encode::encode_destination_name;
use crate::error::CopyError;
use crate::guard::CopyGuard;
use crate::progress::ProgressSink;
use crate::scan::excluded_path;

/// Totals gathered by an [`Expander`] once every task has finished.
#[derive(Debug, Default)]
pub struct ExpandOutcome {
    /// Copy tasks that ran, successful or not.
    pub files_attempted: u64,
    /// Copy tasks that finished without error.
    pub files_copied: u64,
    /// Bytes written by successful copies.
    pub bytes_copied: u64,
    /// Subtree and per-file failures, in completion order.
    pub errors: Vec<CopyError>,
}

/// Walks the tree with one rayon task per directory and per file.
///
/// Every task is spawned into a single `rayon::scope`, so [`Expander::run`]
/// returns only after the whole tree, at every depth, is done. Copy tasks
/// share one [`CopyGuard`]; directory tasks are not bounded.
pub struct Expander<'a> {
    root: &'a Path,
    output_path: PathBuf,
    prefix: &'a str,
    guard: &'a CopyGuard,
    sink: &'a dyn ProgressSink,
    errors: Mutex<Vec<CopyError>>,
    attempted: AtomicU64,
    copied: AtomicU64,
    bytes: AtomicU64,
}

impl<'a> Expander<'a> {
    /// Create an expander rooted at `root`.
    #[must_use]
    pub fn new(
        root: &'a Path,
        config: &'a FlattenConfig,
        guard: &'a CopyGuard,
        sink: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            root,
            output_path: excluded_path(root, config.output_dir()),
            prefix: config.prefix(),
            guard,
            sink,
            errors: Mutex::new(Vec::new()),
            attempted: AtomicU64::new(0),
            copied: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
        }
    }

    /// Expand the whole tree and block until every spawned task has finished.
    ///
    /// Runs on the current rayon pool; call it inside `ThreadPool::install` to
    /// pick the pool.
    pub fn run(&self) {
        rayon::scope(|s| self.expand(s, PathBuf::new()));
    }

    /// Consume the expander and return its totals.
    #[must_use]
    pub fn finish(self) -> ExpandOutcome {
        ExpandOutcome {
            files_attempted: self.attempted.into_inner(),
            files_copied: self.copied.into_inner(),
            bytes_copied: self.bytes.into_inner(),
            errors: self
                .errors
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }

    fn expand<'s>(&'s self, scope: &rayon::Scope<'s>, dir: PathBuf) {
        let source_dir = self.root.join(&dir);

        let entries = match fs::read_dir(&source_dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.record(CopyError::ReadDirError {
                    path: source_dir,
                    io_error: e,
                });
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.record(CopyError::ReadDirError {
                        path: source_dir.clone(),
                        io_error: e,
                    });
                    continue;
                }
            };

            let name = entry.file_name();
            let relative = dir.join(&name);

            if self.root.join(&relative) == self.output_path {
                log::debug!("Skipping output directory {}", relative.display());
                continue;
            }

            let is_dir = match entry.file_type() {
                Ok(file_type) => file_type.is_dir(),
                Err(e) => {
                    self.record(CopyError::MetadataError {
                        path: entry.path(),
                        io_error: e,
                    });
                    continue;
                }
            };

            if is_dir {
                scope.spawn(move |s| self.expand(s, relative));
            } else {
                let parent = dir.clone();
                scope.spawn(move |_| self.copy_one(&parent, &name));
            }
        }
    }

    fn copy_one(&self, parent: &Path, file_name: &OsStr) {
        let permit = self.guard.acquire();

        let source = self.root.join(parent).join(file_name);
        let target = self
            .output_path
            .join(encode_destination_name(self.prefix, parent, file_name));

        match stream_file(&source, &target) {
            Ok(bytes) => {
                self.copied.fetch_add(1, Ordering::Relaxed);
                self.bytes.fetch_add(bytes, Ordering::Relaxed);
            }
            Err(e) => self.record(e),
        }

        drop(permit);
        self.attempted.fetch_add(1, Ordering::Relaxed);
        self.sink.increment();
    }

    fn record(&self, error: CopyError) {
        log::error!("{error}");
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
    }
}
