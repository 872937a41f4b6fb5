//! Run configuration for flatcopy.
//!
//! This crate holds the immutable settings a flatten run is started with:
//!
//! * Output directory name (relative to the traversal root)
//! * Destination filename prefix, normalized to end in `_`
//! * Maximum number of simultaneous copy operations
//! * Whether to report elapsed time
//!
//! # Example
//!
//! ```rust,ignore
//! use flatcopy_config::{FlattenConfig, default_concurrency};
//!
//! let config = FlattenConfig::new("output", "run", default_concurrency(), false)?;
//! assert_eq!(config.prefix(), "run_");
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod types;

pub use error::ConfigError;
pub use types::{
    DEFAULT_OUTPUT_DIR, FlattenConfig, PREFIX_DELIMITER, default_concurrency, normalize_prefix,
};
