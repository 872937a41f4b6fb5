//! Error types for flatten operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// Errors that can occur while scanning, expanding or copying.
///
/// Only the setup variants ever abort a run. Everything raised for a single
/// subtree or file is logged and collected into the run report instead.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// Failed to list a directory.
    #[error("Failed to read directory {}: {io_error}", path.display())]
    ReadDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to stat the output directory.
    #[error("Failed to get metadata for {}: {io_error}", path.display())]
    MetadataError {
        /// The output directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// The output path exists but is not a directory.
    #[error("Output path {} exists and is not a directory", path.display())]
    NotADirectory {
        /// The output path.
        path: PathBuf,
    },

    /// Failed to create the output directory.
    #[error("Failed to create directory {}: {io_error}", path.display())]
    CreateDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to create a destination file.
    #[error("Failed to create file {}: {io_error}", path.display())]
    CreateFileError {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to open a source file.
    #[error("Failed to open file {}: {io_error}", path.display())]
    OpenSourceError {
        /// The source path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed while streaming bytes from source to destination.
    #[error("Failed to copy {} to {}: {io_error}", source_path.display(), target_path.display())]
    FileCopyError {
        /// Source file path.
        source_path: PathBuf,
        /// Target file path.
        target_path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Directory enumeration failed during the scan.
    #[error("Failed to enumerate {}: {message}", path.display())]
    EnumerationError {
        /// The path that could not be enumerated.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The worker pool could not be started.
    #[error("Failed to start worker pool: {message}")]
    ThreadPoolError {
        /// Error message.
        message: String,
    },
}
