//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use flatcopy_config::{ConfigError, DEFAULT_OUTPUT_DIR, FlattenConfig, default_concurrency};

/// CLI arguments for flatcopy.
#[derive(Debug, Parser)]
#[command(
    name = "flatcopy",
    about = "Copy every file beneath the current directory into one flat directory",
    version
)]
pub struct Args {
    /// Output directory, created if absent (relative to the current directory).
    #[arg(short = 'x', long = "output", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Prefix every destination filename with this value.
    #[arg(short = 'p', long, default_value = "")]
    pub prefix: String,

    /// Maximum simultaneous copy operations [default: number of logical CPUs].
    #[arg(short = 'c', long = "concurrency")]
    pub concurrency: Option<usize>,

    /// Report the elapsed time of the whole run.
    #[arg(short = 't', long)]
    pub time: bool,

    /// Disable the progress bar (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Build the run configuration from the parsed flags.
    ///
    /// # Errors
    ///
    /// * If the flags do not form a valid configuration
    pub fn to_config(&self) -> Result<FlattenConfig, ConfigError> {
        FlattenConfig::new(
            self.output.clone(),
            &self.prefix,
            self.concurrency.unwrap_or_else(default_concurrency),
            self.time,
        )
    }

    /// Determine if we should show the progress bar.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}

/// Rewrite single-dash long flags (`-prefix`, `-prefix=run`, `-time`) to their
/// `--` forms so clap does not read them as bundled short flags.
///
/// `-time=true` becomes `--time` and `-time=false` is dropped. Arguments after
/// `--` are left alone.
pub fn expand_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut expanded = Vec::new();
    let mut passthrough = false;

    for arg in args {
        let arg = arg.into();
        if passthrough {
            expanded.push(arg);
            continue;
        }

        match arg.to_str().map(str::to_owned).as_deref() {
            Some("--") => {
                passthrough = true;
                expanded.push(arg);
            }
            Some("-prefix") => expanded.push("--prefix".into()),
            Some("-time" | "-time=true") => expanded.push("--time".into()),
            Some("-time=false") => {}
            Some(value) if value.starts_with("-prefix=") => {
                expanded.push(format!("-{value}").into());
            }
            _ => expanded.push(arg),
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["flatcopy"]).unwrap();
        let config = args.to_config().unwrap();

        assert_eq!(config.output_dir(), Path::new("output"));
        assert_eq!(config.prefix(), "");
        assert_eq!(config.max_concurrent(), default_concurrency());
        assert!(!config.report_timing());
        assert!(args.should_show_progress());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "flatcopy",
            "-x",
            "flat",
            "-p",
            "run",
            "-c",
            "3",
            "-t",
            "--no-progress",
            "-v",
        ])
        .unwrap();
        let config = args.to_config().unwrap();

        assert_eq!(config.output_dir(), Path::new("flat"));
        assert_eq!(config.prefix(), "run_");
        assert_eq!(config.max_concurrent(), 3);
        assert!(config.report_timing());
        assert!(!args.should_show_progress());
        assert!(args.verbose);
    }

    #[test]
    fn test_long_flags() {
        let args = Args::try_parse_from([
            "flatcopy",
            "--output=flat",
            "--prefix=run_",
            "--concurrency=1",
            "--time",
        ])
        .unwrap();
        let config = args.to_config().unwrap();

        assert_eq!(config.output_dir(), Path::new("flat"));
        assert_eq!(config.prefix(), "run_");
        assert_eq!(config.max_concurrent(), 1);
    }

    fn parse_legacy(args: &[&str]) -> Args {
        Args::try_parse_from(expand_legacy_flags(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_single_dash_prefix_with_value() {
        let args = parse_legacy(&["flatcopy", "-x=output", "-prefix=run"]);
        let config = args.to_config().unwrap();

        assert_eq!(config.output_dir(), Path::new("output"));
        assert_eq!(config.prefix(), "run_");
    }

    #[test]
    fn test_single_dash_prefix_separate_value() {
        let args = parse_legacy(&["flatcopy", "-prefix", "run", "-c=2"]);
        let config = args.to_config().unwrap();

        assert_eq!(config.prefix(), "run_");
        assert_eq!(config.max_concurrent(), 2);
    }

    #[test]
    fn test_single_dash_time() {
        assert!(parse_legacy(&["flatcopy", "-time"]).time);
        assert!(parse_legacy(&["flatcopy", "-time=true"]).time);
        assert!(!parse_legacy(&["flatcopy", "-time=false"]).time);
    }

    #[test]
    fn test_double_dash_forms_are_unchanged() {
        let args = parse_legacy(&["flatcopy", "--prefix=run", "--time"]);

        assert_eq!(args.prefix, "run");
        assert!(args.time);
    }

    #[test]
    fn test_legacy_rewrite_stops_at_separator() {
        let expanded = expand_legacy_flags(["flatcopy", "--", "-time"]);

        assert_eq!(expanded[2], "-time");
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let args = Args::try_parse_from(["flatcopy", "-c", "0"]).unwrap();
        assert_eq!(args.to_config(), Err(ConfigError::ZeroConcurrency));
    }

    #[test]
    fn test_non_numeric_concurrency_fails_to_parse() {
        assert!(Args::try_parse_from(["flatcopy", "-c", "many"]).is_err());
    }

    #[test]
    fn test_help_is_reported_as_display_help() {
        let err = Args::try_parse_from(["flatcopy", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
