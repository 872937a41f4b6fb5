//! Progress bar for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::IsTerminal;

use flatcopy_copy::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

/// Decides whether and how the copy progress bar is drawn.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    ///
    /// The bar is only drawn when `enabled` and stderr is a terminal.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: enabled && std::io::stderr().is_terminal(),
        }
    }

    /// Create the bar that tracks copy tasks.
    ///
    /// Its length is set by the run once the scan has finished.
    /// If progress is disabled, returns a hidden bar.
    #[must_use]
    pub fn create_copy_bar(&self) -> CopyBar {
        if !self.enabled {
            return CopyBar {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  Copying [{bar:25.green/dim}] {pos}/{len} files ({per_sec}, {eta})")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        CopyBar { bar }
    }
}

/// Progress bar fed by a flatten run.
pub struct CopyBar {
    bar: ProgressBar,
}

impl CopyBar {
    /// Remove the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Files recorded so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Length set by the run.
    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }
}

impl ProgressSink for CopyBar {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
    }

    fn increment(&self) {
        self.bar.inc(1);
    }
}
