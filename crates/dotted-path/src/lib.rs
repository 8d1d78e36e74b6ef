//! Dotted field paths.
//!
//! A field path names a location inside nested data as a single string of
//! dot-separated segments: `"a.b.c"`. Keys that themselves contain dots are
//! escaped, so any key can be addressed.
//!
//! # Encoding
//!
//! - A single `.` separates segments.
//! - `..` between two non-dot characters is a literal dot inside a segment.
//! - `\.` is a literal dot anywhere (used at the start and end of a segment,
//!   where doubling would be read as a separator).
//! - `\\` is a literal backslash.
//! - A leading run of `n` dots (`n >= 2`) means "go up `n - 1` levels", and
//!   decodes to `n - 1` [`UP`] markers.
//! - `""` and `"."` both denote the current location (no segments).
//!
//! # Example
//!
//! ```
//! use dotted_path::{join_field, literal_field, split_field, unliteral_field};
//!
//! assert_eq!(split_field("a.b").unwrap(), vec!["a", "b"]);
//! assert_eq!(split_field("a..b").unwrap(), vec!["a.b"]);
//! assert_eq!(split_field("..a").unwrap(), vec!["..", "a"]);
//!
//! assert_eq!(join_field(&["a.b", "c"]), "a..b.c");
//! assert_eq!(unliteral_field(&literal_field("x.y.")), "x.y.");
//! ```

use thiserror::Error;

pub mod codec;
pub mod escape;
pub mod relative;
pub mod types;

pub use codec::{is_valid_field, join_field, split_field, split_field_lenient};
pub use escape::{literal_field, unliteral_field};
pub use relative::{
    concat_field, endswith_field, last_field, parent_field, relative_field, startswith_field,
    tail_field,
};
pub use types::{Segment, Segments, UP};

/// Errors raised while decoding a dotted path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// An odd run of three or more dots follows a non-dot character, so it
    /// can not be split into literal dots and a separator unambiguously.
    #[error("Odd number of dots is not allowed in {path:?}")]
    OddDots { path: String },
}

/// Check whether a path denotes the current location.
///
/// # Example
///
/// ```
/// use dotted_path::is_self;
///
/// assert!(is_self(""));
/// assert!(is_self("."));
/// assert!(!is_self("a"));
/// assert!(!is_self(".."));
/// ```
pub fn is_self(path: &str) -> bool {
    path.is_empty() || path == "."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_self() {
        assert!(is_self(""));
        assert!(is_self("."));
        assert!(!is_self("..."));
        assert!(!is_self("a."));
    }

    #[test]
    fn test_error_message_names_path() {
        let err = split_field("a...b").unwrap_err();
        assert_eq!(
            err,
            PathError::OddDots {
                path: "a...b".to_string()
            }
        );
        assert!(err.to_string().contains("a...b"));
    }
}
