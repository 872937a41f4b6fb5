//! Flat destination filenames.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Character that replaces path separators and joins the parent path to the
/// file name.
pub const ENCODED_SEPARATOR: char = '_';

/// Replace every `/` and `\` in a relative parent path with `_`.
///
/// Non UTF-8 parent paths are converted lossily.
#[must_use]
pub fn sanitize_parent(parent: &Path) -> String {
    parent
        .to_string_lossy()
        .replace(['/', '\\'], &ENCODED_SEPARATOR.to_string())
}

/// Build the flat destination name for `parent/file_name`.
///
/// The result is `prefix + sanitize(parent) + "_" + file_name`. An empty
/// parent is not special-cased, so a root-level `z.txt` becomes `_z.txt`
/// (or `run__z.txt` with prefix `run_`), which keeps it apart from
/// `z/...`-style nested names.
///
/// `prefix` is expected to be normalized already (empty or ending in `_`).
#[must_use]
pub fn encode_destination_name(prefix: &str, parent: &Path, file_name: &OsStr) -> OsString {
    let parent = sanitize_parent(parent);
    let mut name = OsString::with_capacity(prefix.len() + parent.len() + 1 + file_name.len());
    name.push(prefix);
    name.push(parent);
    name.push(ENCODED_SEPARATOR.to_string());
    name.push(file_name);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn encode(prefix: &str, parent: &str, name: &str) -> OsString {
        encode_destination_name(prefix, Path::new(parent), OsStr::new(name))
    }

    #[test]
    fn test_encode_nested_file() {
        assert_eq!(encode("run_", "a/b", "y.txt"), "run_a_b_y.txt");
        assert_eq!(encode("run_", "a", "x.txt"), "run_a_x.txt");
    }

    #[test]
    fn test_encode_without_prefix() {
        assert_eq!(encode("", "a/b", "y.txt"), "a_b_y.txt");
    }

    #[test]
    fn test_encode_root_level_file_keeps_separator() {
        assert_eq!(encode("run_", "", "z.txt"), "run__z.txt");
        assert_eq!(encode("", "", "z.txt"), "_z.txt");
    }

    #[test]
    fn test_root_level_file_does_not_alias_nested_file() {
        // `a_x.txt` at the root vs `x.txt` inside `a`
        assert_ne!(encode("", "", "a_x.txt"), encode("", "a", "x.txt"));
    }

    #[test]
    fn test_sanitize_replaces_both_separators() {
        assert_eq!(sanitize_parent(Path::new("a\\b/c")), "a_b_c");
    }

    #[test]
    fn test_distinct_pairs_produce_distinct_names() {
        let pairs = [
            ("", "a.txt"),
            ("", "b.txt"),
            ("dir", "a.txt"),
            ("dir/sub", "a.txt"),
            ("dir/sub/deep", "a.txt"),
            ("other", "a.txt"),
            ("other", "b.txt"),
        ];

        let names: HashSet<OsString> = pairs
            .iter()
            .map(|(parent, name)| encode("p_", parent, name))
            .collect();

        assert_eq!(names.len(), pairs.len());
    }

    #[test]
    fn test_underscore_in_names_is_a_known_collision() {
        // Names containing the encoded separator can alias each other.
        let first = encode("", "a_b", "x.txt");
        let second = encode("", "a/b", "x.txt");
        let third = encode("", "a", "b_x.txt");

        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[cfg(unix)]
    #[test]
    fn test_encode_non_utf8_file_name() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"bad\xffname");
        let encoded = encode_destination_name("", Path::new("dir"), name);

        assert_eq!(encoded.as_bytes(), b"dir_bad\xffname");
    }
}
