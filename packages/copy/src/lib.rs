//! Concurrent tree flattening with bounded parallel copies.
//!
//! Every regular file beneath a root is copied into one flat output
//! directory. Each copy is renamed after its original relative path
//! (`a/b/y.txt` becomes `a_b_y.txt`) so the tree can be read back from the
//! filenames alone.
//!
//! A run has two phases:
//!
//! * A serial pre-scan with `jwalk` that counts the files to copy
//! * A concurrent expansion on a `rayon` pool, one task per directory and per
//!   file, with copies bounded by a shared [`CopyGuard`]
//!
//! Unreadable directories and failed copies are logged and collected in the
//! [`FlattenReport`]; they never abort the run.
//!
//! # Example
//!
//! ```rust,ignore
//! use flatcopy_config::FlattenConfig;
//! use flatcopy_copy::{ProgressTracker, flatten};
//!
//! let config = FlattenConfig::new("output", "run", 8, false)?;
//! let tracker = ProgressTracker::new();
//!
//! let report = flatten(&std::env::current_dir()?, &config, &*tracker)?;
//! println!("{}/{} files copied", report.files_copied, report.files_found);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod copy;
mod encode;
mod error;
mod expand;
mod flatten;
mod guard;
mod progress;
mod scan;

pub use copy::stream_file;
pub use encode::{ENCODED_SEPARATOR, encode_destination_name, sanitize_parent};
pub use error::CopyError;
pub use expand::{ExpandOutcome, Expander};
pub use flatten::{FlattenReport, ensure_output_dir, flatten};
pub use guard::{CopyGuard, CopyPermit};
pub use progress::{ProgressSink, ProgressTracker};
pub use scan::{ScanReport, count_files, scan_tree};
