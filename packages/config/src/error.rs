//! Error types for run configuration.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a [`crate::FlattenConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The output directory does not name a directory (empty, `.` or `..`).
    #[error("Output directory \"{}\" must name a directory", path.display())]
    InvalidOutputDir {
        /// The offending output directory.
        path: PathBuf,
    },

    /// The prefix contains a path separator.
    #[error("Prefix {prefix:?} must not contain a path separator")]
    PrefixContainsSeparator {
        /// The offending prefix.
        prefix: String,
    },

    /// The concurrency limit was zero.
    #[error("Maximum concurrent copies must be at least 1")]
    ZeroConcurrency,
}
