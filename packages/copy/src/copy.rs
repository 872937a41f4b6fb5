//! Byte-for-byte copy of a single file into the flat output directory.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::CopyError;

/// Stream `source` into `target`, returning the number of bytes written.
///
/// The target is created (or truncated) before the source is opened, so a
/// missing source leaves an empty target behind. A failure part way through
/// leaves a partial target. Neither is cleaned up.
///
/// # Errors
///
/// * If the target cannot be created
/// * If the source cannot be opened
/// * If streaming fails
pub fn stream_file(source: &Path, target: &Path) -> Result<u64, CopyError> {
    let mut target_file = File::create(target).map_err(|e| CopyError::CreateFileError {
        path: target.to_path_buf(),
        io_error: e,
    })?;

    let mut source_file = File::open(source).map_err(|e| CopyError::OpenSourceError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    let bytes = io::copy(&mut source_file, &mut target_file).map_err(|e| {
        CopyError::FileCopyError {
            source_path: source.to_path_buf(),
            target_path: target.to_path_buf(),
            io_error: e,
        }
    })?;

    log::trace!(
        "Copied {} -> {} ({bytes} bytes)",
        source.display(),
        target.display()
    );

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_stream_file_creates_new() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");

        fs::write(&source, "hello world").unwrap();

        let bytes = stream_file(&source, &target).unwrap();

        assert_eq!(bytes, 11);
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello world");
    }

    #[test]
    fn test_stream_file_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");

        fs::write(&source, "new").unwrap();
        fs::write(&target, "old content that is longer").unwrap();

        stream_file(&source, &target).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_stream_file_missing_source_leaves_empty_target() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("missing.txt");
        let target = dir.path().join("target.txt");

        let result = stream_file(&source, &target);

        assert!(matches!(result, Err(CopyError::OpenSourceError { .. })));
        assert_eq!(fs::read(&target).unwrap().len(), 0);
    }

    #[test]
    fn test_stream_file_missing_target_directory() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("no_such_dir/target.txt");

        fs::write(&source, "content").unwrap();

        let result = stream_file(&source, &target);

        assert!(matches!(result, Err(CopyError::CreateFileError { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_stream_file_directory_source_fails_while_streaming() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a_directory");
        let target = dir.path().join("target.txt");

        fs::create_dir(&source).unwrap();

        let result = stream_file(&source, &target);

        assert!(matches!(result, Err(CopyError::FileCopyError { .. })));
    }
}
