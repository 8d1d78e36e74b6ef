//! Splitting and joining whole dotted paths.

use crate::escape::literal_field;
use crate::types::{Segments, UP};
use crate::PathError;

/// Split a dotted path into decoded segments.
///
/// A leading run of `n >= 2` dots yields `n - 1` [`UP`] markers. Empty
/// segments (from a trailing separator) are dropped.
///
/// # Errors
///
/// Returns [`PathError::OddDots`] when a non-dot character is followed by an
/// odd run of three or more dots, such as `"a...b"`.
///
/// # Example
///
/// ```
/// use dotted_path::split_field;
///
/// assert_eq!(split_field("").unwrap(), Vec::<String>::new());
/// assert_eq!(split_field(".").unwrap(), Vec::<String>::new());
/// assert_eq!(split_field("a.b.c").unwrap(), vec!["a", "b", "c"]);
/// assert_eq!(split_field("a..b.c").unwrap(), vec!["a.b", "c"]);
/// assert_eq!(split_field("...a").unwrap(), vec!["..", "..", "a"]);
/// assert!(split_field("a...b").is_err());
/// ```
pub fn split_field(path: &str) -> Result<Segments, PathError> {
    decode(path, true)
}

/// Split a dotted path, never failing.
///
/// Same as [`split_field`] except that an odd run of three or more dots is
/// read as literal dot pairs followed by one separator: `"a...b"` becomes
/// `["a.", "b"]`.
///
/// # Example
///
/// ```
/// use dotted_path::split_field_lenient;
///
/// assert_eq!(split_field_lenient("a...b"), vec!["a.", "b"]);
/// assert_eq!(split_field_lenient("a.b"), vec!["a", "b"]);
/// ```
pub fn split_field_lenient(path: &str) -> Segments {
    match decode(path, false) {
        Ok(segments) => segments,
        // lenient decoding has no failure path
        Err(_) => Vec::new(),
    }
}

/// Check whether a path decodes under [`split_field`].
pub fn is_valid_field(path: &str) -> bool {
    decode(path, true).is_ok()
}

fn decode(path: &str, strict: bool) -> Result<Segments, PathError> {
    if path.is_empty() || path == "." {
        return Ok(Vec::new());
    }
    let chars: Vec<char> = path.chars().collect();
    let n = chars.len();
    let mut out: Segments = Vec::new();

    let lead = chars.iter().take_while(|&&c| c == '.').count();
    for _ in 1..lead {
        out.push(UP.to_string());
    }

    let mut segment = String::new();
    let mut i = lead;
    while i < n {
        let c = chars[i];
        if c == '\\' {
            match chars.get(i + 1) {
                Some(&next) if next == '.' || next == '\\' => {
                    segment.push(next);
                    i += 2;
                }
                _ => {
                    segment.push(c);
                    i += 1;
                }
            }
            continue;
        }
        if c != '.' {
            segment.push(c);
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&c| c == '.').count();
        i += run;
        if run == 1 {
            flush(&mut segment, &mut out);
        } else if run % 2 == 0 {
            push_dots(&mut segment, run / 2);
        } else if strict {
            return Err(PathError::OddDots {
                path: path.to_string(),
            });
        } else {
            push_dots(&mut segment, run / 2);
            flush(&mut segment, &mut out);
        }
    }
    flush(&mut segment, &mut out);
    Ok(out)
}

fn push_dots(segment: &mut String, count: usize) {
    for _ in 0..count {
        segment.push('.');
    }
}

fn flush(segment: &mut String, out: &mut Segments) {
    if !segment.is_empty() {
        out.push(std::mem::take(segment));
    }
}

/// Join segments into a dotted path.
///
/// Each segment is escaped with [`literal_field`]. [`UP`] markers cancel the
/// segment before them; the ones left over become the leading dot run. An
/// empty result is `"."`.
///
/// # Example
///
/// ```
/// use dotted_path::join_field;
///
/// assert_eq!(join_field::<&str>(&[]), ".");
/// assert_eq!(join_field(&["a", "b"]), "a.b");
/// assert_eq!(join_field(&["a.b"]), "a..b");
/// assert_eq!(join_field(&["a", "..", "b"]), "b");
/// assert_eq!(join_field(&["..", "a"]), "..a");
/// ```
pub fn join_field<S: AsRef<str>>(segments: &[S]) -> String {
    let mut kept: Vec<&str> = Vec::with_capacity(segments.len());
    let mut ups = 0usize;
    for segment in segments {
        let segment = segment.as_ref();
        if segment == UP {
            if kept.pop().is_none() {
                ups += 1;
            }
        } else if !segment.is_empty() {
            kept.push(segment);
        }
    }

    let body = kept
        .iter()
        .map(|s| literal_field(s))
        .collect::<Vec<_>>()
        .join(".");
    if ups == 0 {
        if body.is_empty() {
            ".".to_string()
        } else {
            body
        }
    } else {
        let mut out = ".".repeat(ups + 1);
        out.push_str(&body);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_field_simple() {
        assert_eq!(split_field("a").unwrap(), vec!["a"]);
        assert_eq!(split_field("a.b.c").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_field_trailing_separator() {
        assert_eq!(split_field("a.").unwrap(), vec!["a"]);
        assert_eq!(split_field("a.b.").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_split_field_escaped_dots() {
        assert_eq!(split_field("a..b").unwrap(), vec!["a.b"]);
        assert_eq!(split_field("a....b").unwrap(), vec!["a..b"]);
        assert_eq!(split_field("a..").unwrap(), vec!["a."]);
        assert_eq!(split_field("c.d.e\\.f").unwrap(), vec!["c", "d", "e.f"]);
        assert_eq!(split_field("\\.a.b").unwrap(), vec![".a", "b"]);
    }

    #[test]
    fn test_split_field_backslashes() {
        assert_eq!(split_field("a\\\\.b").unwrap(), vec!["a\\", "b"]);
        assert_eq!(split_field("a\\b").unwrap(), vec!["a\\b"]);
    }

    #[test]
    fn test_split_field_up_markers() {
        assert_eq!(split_field("..").unwrap(), vec![".."]);
        assert_eq!(split_field("..a.b").unwrap(), vec!["..", "a", "b"]);
        assert_eq!(split_field("....a").unwrap(), vec!["..", "..", "..", "a"]);
        assert_eq!(split_field(".a").unwrap(), vec!["a"]);
    }

    #[test]
    fn test_split_field_odd_dots() {
        assert!(split_field("a...b").is_err());
        assert!(split_field("a.....b").is_err());
        assert!(split_field("a...").is_err());
        assert!(!is_valid_field("x...y"));
        assert!(is_valid_field("x..y"));
    }

    #[test]
    fn test_split_field_lenient_odd_dots() {
        assert_eq!(split_field_lenient("a...b"), vec!["a.", "b"]);
        assert_eq!(split_field_lenient("a.....b"), vec!["a..", "b"]);
        assert_eq!(split_field_lenient("a..b"), vec!["a.b"]);
    }

    #[test]
    fn test_join_field_up_markers() {
        assert_eq!(join_field(&[".."]), "..");
        assert_eq!(join_field(&["..", ".."]), "...");
        assert_eq!(join_field(&["a", ".."]), ".");
        assert_eq!(join_field(&["a", "b", "..", "..", "..", "c"]), "..c");
    }

    #[test]
    fn test_join_field_escapes() {
        assert_eq!(join_field(&["a.", "b"]), "a\\..b");
        assert_eq!(join_field(&[".a"]), "\\.a");
        assert_eq!(join_field(&["a\\b"]), "a\\\\b");
    }

    #[test]
    fn test_join_then_split() {
        let segments = vec!["x.y".to_string(), ".z".to_string(), "w.".to_string()];
        assert_eq!(split_field(&join_field(&segments)).unwrap(), segments);
    }
}
