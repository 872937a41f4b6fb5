//! flatcopy CLI entry point.
//!
//! Copies every file beneath the current directory into a single flat
//! output directory, naming each copy after its original relative path.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;
mod progress;

use std::env;

use clap::Parser;
use log::LevelFilter;

use args::Args;
use flatcopy_copy::flatten;
use progress::ProgressManager;

fn main() {
    let args = Args::parse_from(args::expand_legacy_flags(env::args_os()));

    // Set up logging; RUST_LOG still wins over the default level
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config()?;

    if config.report_timing() {
        log::info!("Requested timed execution");
    }

    let cwd = env::current_dir()?;
    output::print_header(&cwd, config.output_dir());

    let progress_mgr = ProgressManager::new(args.should_show_progress());
    let bar = progress_mgr.create_copy_bar();

    let result = flatten(&cwd, &config, &bar);
    bar.finish();
    let report = result?;

    output::print_summary(&report, config.output_dir());

    if config.report_timing() {
        log::info!(
            "Finished execution, time elapsed: {:.2}s",
            report.elapsed.as_secs_f64()
        );
    }

    Ok(())
}
