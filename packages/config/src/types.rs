//! Configuration types for flatcopy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Delimiter a non-empty prefix is normalized to end with.
pub const PREFIX_DELIMITER: char = '_';

/// Number of simultaneous copies used when none is given.
#[must_use]
pub fn default_concurrency() -> usize {
    num_cpus::get()
}

/// Normalize a destination prefix.
///
/// An empty prefix stays empty. Anything else gets a trailing `_` unless it
/// already ends with one.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with(PREFIX_DELIMITER) {
        prefix.to_string()
    } else {
        format!("{prefix}{PREFIX_DELIMITER}")
    }
}

/// Immutable settings for a single flatten run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenConfig {
    output_dir: PathBuf,
    prefix: String,
    max_concurrent: usize,
    report_timing: bool,
}

impl FlattenConfig {
    /// Build and validate a configuration.
    ///
    /// # Arguments
    ///
    /// * `output_dir` - Destination directory, relative to the traversal root
    /// * `prefix` - Prefix for every destination filename (normalized)
    /// * `max_concurrent` - Maximum simultaneous copy operations
    /// * `report_timing` - Whether elapsed time is reported at exit
    ///
    /// # Errors
    ///
    /// * If `output_dir` is empty or has no normal component (`.`, `..`)
    /// * If `prefix` contains `/` or `\`
    /// * If `max_concurrent` is zero
    pub fn new(
        output_dir: impl Into<PathBuf>,
        prefix: &str,
        max_concurrent: usize,
        report_timing: bool,
    ) -> Result<Self, ConfigError> {
        let output_dir = output_dir.into();

        if !output_dir
            .components()
            .any(|c| matches!(c, Component::Normal(_)))
        {
            return Err(ConfigError::InvalidOutputDir { path: output_dir });
        }

        if prefix.contains(['/', '\\']) {
            return Err(ConfigError::PrefixContainsSeparator {
                prefix: prefix.to_string(),
            });
        }

        if max_concurrent == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        let prefix = normalize_prefix(prefix);
        log::debug!(
            "Config: output={} prefix={prefix:?} max_concurrent={max_concurrent}",
            output_dir.display()
        );

        Ok(Self {
            output_dir,
            prefix,
            max_concurrent,
            report_timing,
        })
    }

    /// Destination directory, relative to the traversal root.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Normalized destination prefix (empty or ending in `_`).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Maximum simultaneous copy operations.
    #[must_use]
    pub const fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Whether elapsed time should be reported.
    #[must_use]
    pub const fn report_timing(&self) -> bool {
        self.report_timing
    }
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: String::new(),
            max_concurrent: default_concurrency().max(1),
            report_timing: false,
        }
    }
}
