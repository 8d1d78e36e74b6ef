//! Path arithmetic: concatenation, relative paths and prefix/suffix tests.

use crate::codec::{join_field, split_field, split_field_lenient};
use crate::types::{Segments, UP};
use crate::PathError;

/// Concatenate paths, resolving [`UP`] markers.
///
/// # Errors
///
/// Returns [`PathError::OddDots`] if any input fails to split.
///
/// # Example
///
/// ```
/// use dotted_path::concat_field;
///
/// assert_eq!(concat_field(&["a.b", "c"]).unwrap(), "a.b.c");
/// assert_eq!(concat_field(&["a.b", "..c"]).unwrap(), "a.c");
/// assert_eq!(concat_field(&["a", "..."]).unwrap(), "..");
/// assert_eq!(concat_field(&[".", "a"]).unwrap(), "a");
/// ```
pub fn concat_field(paths: &[&str]) -> Result<String, PathError> {
    let mut segments: Segments = Vec::new();
    for path in paths {
        segments.extend(split_field(path)?);
    }
    Ok(join_field(&segments))
}

/// Express `field` relative to `parent`.
///
/// Each parent segment not shared with `field` contributes one extra leading
/// dot. A `parent` that is itself relative (starts with a dot) leaves
/// `field` unchanged.
///
/// # Errors
///
/// Returns [`PathError::OddDots`] if either input fails to split.
///
/// # Example
///
/// ```
/// use dotted_path::relative_field;
///
/// assert_eq!(relative_field("a.b.c", "a").unwrap(), "b.c");
/// assert_eq!(relative_field("a.b", "a.b").unwrap(), ".");
/// assert_eq!(relative_field("a.x", "a.b").unwrap(), "..x");
/// assert_eq!(relative_field("x", "a.b").unwrap(), "...x");
/// ```
pub fn relative_field(field: &str, parent: &str) -> Result<String, PathError> {
    if parent.starts_with('.') {
        return Ok(field.to_string());
    }
    let field_segments = split_field(field)?;
    let parent_segments = split_field(parent)?;

    let common = field_segments
        .iter()
        .zip(parent_segments.iter())
        .take_while(|(f, p)| f == p)
        .count();

    let remaining = &field_segments[common..];
    let ups = parent_segments.len() - common;
    if ups == 0 {
        return Ok(join_field(remaining));
    }
    let mut segments: Segments = vec![UP.to_string(); ups];
    segments.extend(remaining.iter().cloned());
    Ok(join_field(&segments))
}

/// Check whether `field` is `prefix` or lies under it.
///
/// Matching is on whole segments: `"ab"` does not start with `"a"`. An empty
/// or relative prefix matches every field.
///
/// # Example
///
/// ```
/// use dotted_path::startswith_field;
///
/// assert!(startswith_field("a.b", "a"));
/// assert!(startswith_field("a", "a"));
/// assert!(!startswith_field("ab", "a"));
/// assert!(!startswith_field("a..b", "a"));
/// assert!(startswith_field("anything", "."));
/// ```
pub fn startswith_field(field: &str, prefix: &str) -> bool {
    if prefix.is_empty() || prefix.starts_with('.') {
        return true;
    }
    split_field_lenient(field).starts_with(&split_field_lenient(prefix))
}

/// Check whether `field` ends with the whole segments of `suffix`.
///
/// A `suffix` of `"."` matches every field.
///
/// # Example
///
/// ```
/// use dotted_path::endswith_field;
///
/// assert!(endswith_field("a.b", "b"));
/// assert!(endswith_field("b", "b"));
/// assert!(!endswith_field("ab", "b"));
/// assert!(!endswith_field("a..b", "b"));
/// assert!(endswith_field("a.b", "."));
/// ```
pub fn endswith_field(field: &str, suffix: &str) -> bool {
    if suffix.is_empty() || suffix == "." {
        return true;
    }
    split_field_lenient(field).ends_with(&split_field_lenient(suffix))
}

/// Split a path into its first segment and the remaining path.
///
/// The remainder of a one-segment path is `"."`; an empty path has no first
/// segment.
///
/// # Errors
///
/// Returns [`PathError::OddDots`] if the path fails to split.
///
/// # Example
///
/// ```
/// use dotted_path::tail_field;
///
/// assert_eq!(tail_field("a.b.c").unwrap(), (Some("a".to_string()), "b.c".to_string()));
/// assert_eq!(tail_field("a").unwrap(), (Some("a".to_string()), ".".to_string()));
/// assert_eq!(tail_field("meta\\.stats").unwrap(), (Some("meta.stats".to_string()), ".".to_string()));
/// assert_eq!(tail_field(".").unwrap(), (None, ".".to_string()));
/// ```
pub fn tail_field(path: &str) -> Result<(Option<String>, String), PathError> {
    let segments = split_field(path)?;
    match segments.split_first() {
        Some((first, rest)) => Ok((Some(first.clone()), join_field(rest))),
        None => Ok((None, ".".to_string())),
    }
}

/// Drop the last segment of a path.
///
/// # Errors
///
/// Returns [`PathError::OddDots`] if the path fails to split.
///
/// # Example
///
/// ```
/// use dotted_path::parent_field;
///
/// assert_eq!(parent_field("a.b.c").unwrap(), "a.b");
/// assert_eq!(parent_field("a").unwrap(), ".");
/// ```
pub fn parent_field(path: &str) -> Result<String, PathError> {
    let segments = split_field(path)?;
    match segments.split_last() {
        Some((_, rest)) => Ok(join_field(rest)),
        None => Ok(join_field(&[UP])),
    }
}

/// The last segment of a path, decoded.
///
/// # Errors
///
/// Returns [`PathError::OddDots`] if the path fails to split.
pub fn last_field(path: &str) -> Result<Option<String>, PathError> {
    Ok(split_field(path)?.pop())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_field_resolves_up_markers() {
        assert_eq!(concat_field(&["a.b.c", "...d"]).unwrap(), "a.d");
        assert_eq!(concat_field(&["a", "b", "c"]).unwrap(), "a.b.c");
        assert_eq!(concat_field(&[]).unwrap(), ".");
    }

    #[test]
    fn test_concat_field_rejects_odd_dots() {
        assert!(concat_field(&["a", "b...c"]).is_err());
    }

    #[test]
    fn test_relative_field_relative_parent() {
        assert_eq!(relative_field("a.b", "..x").unwrap(), "a.b");
        assert_eq!(relative_field("a.b", ".").unwrap(), "a.b");
    }

    #[test]
    fn test_relative_field_round_trip_with_concat() {
        let rel = relative_field("a.x.y", "a.b.c").unwrap();
        assert_eq!(rel, "...x.y");
        assert_eq!(concat_field(&["a.b.c", &rel]).unwrap(), "a.x.y");
    }

    #[test]
    fn test_startswith_field_escaped_boundary() {
        assert!(!startswith_field("a\\.b", "a"));
        assert!(startswith_field("a.b.c", "a.b"));
        assert!(startswith_field("a.", "a"));
        assert!(startswith_field("x", ""));
    }

    #[test]
    fn test_endswith_field_escaped_boundary() {
        assert!(!endswith_field("a\\.b", "b"));
        assert!(endswith_field("a.b.c", "b.c"));
        assert!(!endswith_field("a.bb", "b"));
    }

    #[test]
    fn test_prefix_and_suffix_after_escaped_backslash() {
        let field = join_field(&["x\\", "b"]);
        assert_eq!(field, "x\\\\.b");
        assert!(endswith_field(&field, "b"));
        assert!(!endswith_field(&field, "x.b"));

        let field = join_field(&["a", "y\\"]);
        assert!(startswith_field(&field, "a"));
        assert!(endswith_field(&field, &join_field(&["y\\"])));
    }

    #[test]
    fn test_parent_field_of_self() {
        assert_eq!(parent_field(".").unwrap(), "..");
    }

    #[test]
    fn test_last_field() {
        assert_eq!(last_field("a.b..c").unwrap(), Some("b.c".to_string()));
        assert_eq!(last_field("").unwrap(), None);
    }
}
