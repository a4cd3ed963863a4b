//! Slash-separated path helpers.
//!
//! Template names, template directories and base directories are all plain
//! strings using `/` as separator, independent of the host OS. These helpers
//! turn them into consistent lookup keys.

use std::io;

/// Joins path segments into one slash-separated path.
///
/// - Backslashes are converted to forward slashes.
/// - Every segment after the first loses one leading `/`.
/// - Every segment but the last gets a trailing `/` if it lacks one; the last
///   one gets it only when `force_suffix_slash` is set.
/// - A segment that is exactly `"/"` is written verbatim.
/// - Empty segments are skipped.
///
/// # Example
///
/// ```rust
/// use pagekit_render::nice_path;
///
/// assert_eq!(nice_path(false, &["pages", "/index.html"]), "pages/index.html");
/// assert_eq!(nice_path(true, &["static\\css"]), "static/css/");
/// ```
pub fn nice_path(force_suffix_slash: bool, parts: &[&str]) -> String {
    let parts: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    let last = parts.len().saturating_sub(1);
    let mut out = String::new();

    for (i, part) in parts.iter().enumerate() {
        let mut segment = part.replace('\\', "/");
        if segment == "/" {
            out.push_str(&segment);
            continue;
        }
        if i != 0 {
            if let Some(rest) = segment.strip_prefix('/') {
                segment = rest.to_string();
            }
        }
        let wants_slash = i != last || force_suffix_slash;
        if wants_slash && !segment.ends_with('/') {
            segment.push('/');
        }
        out.push_str(&segment);
    }

    out
}

/// Returns the trailing file name of a slash (or backslash) separated path.
///
/// A path ending in a separator yields an empty string.
///
/// ```rust
/// use pagekit_render::filename_from_path;
///
/// assert_eq!(filename_from_path("pages/blog/post.html"), "post.html");
/// assert_eq!(filename_from_path("index.html"), "index.html");
/// ```
pub fn filename_from_path(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Normalizes a path for lookup inside a template filesystem.
///
/// The result is root-relative: leading `/` and `.` segments are dropped and
/// empty segments collapse. Parent references (`..`) are rejected so lookups
/// never leave the filesystem root. The root itself normalizes to `""`.
pub fn normalize_fs_path(path: &str) -> io::Result<String> {
    let path = path.replace('\\', "/");
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("path escapes template root: {}", path),
                ))
            }
            s => segments.push(s),
        }
    }
    Ok(segments.join("/"))
}

/// Joins a directory and a file name inside a template filesystem.
pub(crate) fn join_fs_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_nice_path_joins_segments() {
        assert_eq!(nice_path(false, &["templates", "index.html"]), "templates/index.html");
        assert_eq!(nice_path(false, &["templates/", "/index.html"]), "templates/index.html");
        assert_eq!(nice_path(false, &["a", "b", "c.html"]), "a/b/c.html");
    }

    #[test]
    fn test_nice_path_single_segment_untouched() {
        assert_eq!(nice_path(false, &["index.html"]), "index.html");
        assert_eq!(nice_path(false, &["/index.html"]), "/index.html");
    }

    #[test]
    fn test_nice_path_force_suffix_slash() {
        assert_eq!(nice_path(true, &["static"]), "static/");
        assert_eq!(nice_path(true, &["static/"]), "static/");
        assert_eq!(nice_path(true, &["a", "b"]), "a/b/");
    }

    #[test]
    fn test_nice_path_backslashes() {
        assert_eq!(nice_path(false, &["pages\\blog", "post.html"]), "pages/blog/post.html");
    }

    #[test]
    fn test_nice_path_root_segment() {
        assert_eq!(nice_path(false, &["/", "index.html"]), "/index.html");
    }

    #[test]
    fn test_nice_path_skips_empty_segments() {
        assert_eq!(nice_path(false, &["", "index.html"]), "index.html");
        assert_eq!(nice_path(false, &[]), "");
    }

    #[test]
    fn test_filename_from_path() {
        assert_eq!(filename_from_path("a/b/c.html"), "c.html");
        assert_eq!(filename_from_path("a\\b\\c.html"), "c.html");
        assert_eq!(filename_from_path("c.html"), "c.html");
        assert_eq!(filename_from_path("a/b/"), "");
    }

    #[test]
    fn test_normalize_fs_path() {
        assert_eq!(normalize_fs_path("/pages//index.html").unwrap(), "pages/index.html");
        assert_eq!(normalize_fs_path("./layouts/./base.html").unwrap(), "layouts/base.html");
        assert_eq!(normalize_fs_path(".").unwrap(), "");
        assert_eq!(normalize_fs_path("").unwrap(), "");
    }

    #[test]
    fn test_normalize_fs_path_rejects_parent() {
        let err = normalize_fs_path("pages/../../etc/passwd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_join_fs_path() {
        assert_eq!(join_fs_path("layouts", "base.html"), "layouts/base.html");
        assert_eq!(join_fs_path("layouts/", "base.html"), "layouts/base.html");
        assert_eq!(join_fs_path(".", "base.html"), "base.html");
        assert_eq!(join_fs_path("", "base.html"), "base.html");
    }

    proptest! {
        #[test]
        fn prop_filename_has_no_separator(path in "[a-z/\\\\.]{0,24}") {
            let name = filename_from_path(&path);
            prop_assert!(!name.contains('/'));
            prop_assert!(!name.contains('\\'));
            prop_assert!(path.ends_with(name));
        }

        #[test]
        fn prop_nice_path_ends_with_last_filename(
            dirs in proptest::collection::vec("[a-z]{1,6}", 0..4),
            file in "[a-z]{1,6}\\.html",
        ) {
            let mut parts: Vec<&str> = dirs.iter().map(String::as_str).collect();
            parts.push(&file);
            let joined = nice_path(false, &parts);
            prop_assert_eq!(filename_from_path(&joined), file.as_str());
            prop_assert!(!joined.contains("//"));
        }

        #[test]
        fn prop_normalize_is_idempotent(path in "[a-z/.]{0,24}") {
            if let Ok(once) = normalize_fs_path(&path) {
                prop_assert_eq!(normalize_fs_path(&once).unwrap(), once.clone());
                prop_assert!(!once.starts_with('/'));
            }
        }
    }
}
