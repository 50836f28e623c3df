//! Project-relative path helpers.
//!
//! Paths inside a project are `/`-joined segment lists relative to the
//! project root. The root itself is the empty string. Stored paths never
//! carry a leading or trailing slash, empty segments, `.` or `..`.

use itertools::Itertools;

/// Iterate the non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Normalize a path into its canonical stored form.
///
/// `.` segments are dropped and `..` removes the previous segment. A `..`
/// at the root is discarded rather than escaping the project.
pub fn normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for segment in segments(path) {
        match segment {
            "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
    stack.join("/")
}

/// Parent of a path; `""` for the root and for single-segment paths.
pub fn parent_of(path: &str) -> String {
    let parts: Vec<&str> = segments(path).collect();
    match parts.split_last() {
        Some((_, rest)) => rest.join("/"),
        None => String::new(),
    }
}

/// Join a child name onto a directory path and normalize the result.
pub fn join(base: &str, name: &str) -> String {
    if base.is_empty() {
        normalize(name)
    } else {
        normalize(&format!("{base}/{name}"))
    }
}

/// Number of segments in a path; the root has depth 0.
pub fn depth(path: &str) -> usize {
    segments(path).count()
}

/// Cumulative prefixes of a path: `"a/b/c"` yields `"a"`, `"a/b"`, `"a/b/c"`.
pub fn prefixes(path: &str) -> Vec<(String, String)> {
    let parts: Vec<&str> = segments(path).collect();
    (1..=parts.len())
        .map(|end| (parts[end - 1].to_string(), parts[..end].iter().join("/")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of(""), "");
        assert_eq!(parent_of("src"), "");
        assert_eq!(parent_of("src/app"), "src");
        assert_eq!(parent_of("src/app/mod.rs"), "src/app");
        assert_eq!(parent_of("/src//app/"), "src");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("/"), "");
        assert_eq!(normalize("a/./b/"), "a/b");
        assert_eq!(normalize("a/../b"), "b");
        assert_eq!(normalize("../../a"), "a");
        assert_eq!(normalize("a/b/../.."), "");
        assert_eq!(normalize("//a///b"), "a/b");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "src"), "src");
        assert_eq!(join("src", "app"), "src/app");
        assert_eq!(join("src/app", ".."), "src");
    }

    #[test]
    fn test_prefixes() {
        assert!(prefixes("").is_empty());
        assert_eq!(
            prefixes("a/b"),
            vec![
                ("a".to_string(), "a".to_string()),
                ("b".to_string(), "a/b".to_string())
            ]
        );
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(""), 0);
        assert_eq!(depth("a/b/c"), 3);
    }
}
