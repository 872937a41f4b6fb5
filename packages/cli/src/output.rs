//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use colored::Colorize;
use flatcopy_copy::FlattenReport;

/// Failures listed in the summary before the rest are elided.
const MAX_LISTED_FAILURES: usize = 10;

/// Print a header message.
pub fn print_header(root: &Path, output_dir: &Path) {
    println!(
        "Flattening {} into {}",
        root.display().to_string().cyan(),
        output_dir.display().to_string().yellow()
    );
}

/// Print the end-of-run summary.
pub fn print_summary(report: &FlattenReport, output_dir: &Path) {
    println!(
        "{} Copied {}/{} files ({} bytes) into {}",
        "✓".green(),
        report.files_copied,
        report.files_found,
        report.bytes_copied,
        output_dir.display()
    );

    let failures = failure_lines(report);
    if failures.is_empty() {
        return;
    }

    print_warning(&format!(
        "{} file{} failed, {} problem{} reported",
        report.files_failed(),
        if report.files_failed() == 1 { "" } else { "s" },
        failures.len(),
        if failures.len() == 1 { "" } else { "s" },
    ));
    for failure in failures.iter().take(MAX_LISTED_FAILURES) {
        println!("  {} {}", "•".dimmed(), failure);
    }
    if failures.len() > MAX_LISTED_FAILURES {
        println!(
            "  {} ... and {} more",
            "•".dimmed(),
            failures.len() - MAX_LISTED_FAILURES
        );
    }
}

/// Problems worth listing after a run; empty when every found file was copied.
fn failure_lines(report: &FlattenReport) -> Vec<String> {
    if report.is_complete() {
        return Vec::new();
    }

    let mut lines: Vec<String> = report
        .scan_errors
        .iter()
        .chain(&report.errors)
        .map(ToString::to_string)
        .collect();

    if lines.is_empty() {
        lines.push(format!(
            "only {} of {} files found by the scan were copied",
            report.files_copied, report.files_found
        ));
    }
    lines
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatcopy_copy::CopyError;
    use std::path::PathBuf;

    #[test]
    fn test_complete_run_has_no_failure_lines() {
        let report = FlattenReport {
            files_found: 2,
            files_attempted: 2,
            files_copied: 2,
            ..FlattenReport::default()
        };

        assert!(failure_lines(&report).is_empty());
    }

    #[test]
    fn test_failed_copy_is_listed() {
        let report = FlattenReport {
            files_found: 2,
            files_attempted: 2,
            files_copied: 1,
            errors: vec![CopyError::OpenSourceError {
                path: PathBuf::from("a/x.txt"),
                io_error: std::io::Error::from(std::io::ErrorKind::NotFound),
            }],
            ..FlattenReport::default()
        };

        let lines = failure_lines(&report);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("a/x.txt"));
    }

    #[test]
    fn test_file_count_mismatch_without_errors_is_listed() {
        let report = FlattenReport {
            files_found: 3,
            files_attempted: 2,
            files_copied: 2,
            ..FlattenReport::default()
        };

        assert_eq!(failure_lines(&report).len(), 1);
    }
}
