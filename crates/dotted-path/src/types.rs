//! Type definitions for dotted paths.

/// One decoded path segment: a plain key, or the [`UP`] marker.
pub type Segment = String;

/// A decoded path.
pub type Segments = Vec<Segment>;

/// Marker segment meaning "parent of the current location".
///
/// A literal key spelled `..` is escaped by [`crate::literal_field`] as
/// `\.\.`, so this marker never collides with a real key once a path has been
/// decoded.
pub const UP: &str = "..";

/// Check whether a decoded segment is the [`UP`] marker.
pub fn is_up(segment: &str) -> bool {
    segment == UP
}
