//! Progress tracking for flatten runs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Receiver of progress events.
///
/// `set_total` is called once with the scan result before any copy starts;
/// `increment` is called once per finished copy task, successful or not.
/// Implementations are shared by every copy task and must be thread-safe.
pub trait ProgressSink: Send + Sync {
    /// Set the number of files the run expects to copy.
    fn set_total(&self, total: u64);

    /// Record one finished copy task.
    fn increment(&self);
}

/// Thread-safe progress tracker using atomics.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    files_total: AtomicU64,
    files_copied: AtomicU64,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get the current total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.files_total.load(Ordering::SeqCst)
    }

    /// Get the current copied count.
    #[must_use]
    pub fn copied(&self) -> u64 {
        self.files_copied.load(Ordering::SeqCst)
    }
}

impl ProgressSink for ProgressTracker {
    fn set_total(&self, total: u64) {
        self.files_total.store(total, Ordering::SeqCst);
    }

    fn increment(&self) {
        self.files_copied.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_counts_increments_across_threads() {
        let tracker = ProgressTracker::new();
        tracker.set_total(64);

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..8 {
                        tracker.increment();
                    }
                });
            }
        });

        assert_eq!(tracker.total(), 64);
        assert_eq!(tracker.copied(), 64);
    }
}
