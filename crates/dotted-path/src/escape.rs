//! Escaping of single path segments.

/// Escape one key so it survives being joined into a dotted path.
///
/// Interior dots are doubled. A dot at the start or end of the key is
/// written as `\.`, since a doubled dot there would merge with the
/// neighbouring separator. Backslashes are written as `\\`.
///
/// # Example
///
/// ```
/// use dotted_path::literal_field;
///
/// assert_eq!(literal_field("a.b"), "a..b");
/// assert_eq!(literal_field(".a"), "\\.a");
/// assert_eq!(literal_field("a."), "a\\.");
/// assert_eq!(literal_field("plain"), "plain");
/// ```
pub fn literal_field(field: &str) -> String {
    if !field.contains('.') && !field.contains('\\') {
        return field.to_string();
    }
    let last = field.chars().count() - 1;
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        match c {
            '.' if i == 0 || i == last => out.push_str("\\."),
            '.' => out.push_str(".."),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out
}

/// Reverse [`literal_field`] for a single segment.
///
/// `..` becomes `.`, `\.` becomes `.` and `\\` becomes `\`. Anything else,
/// including a lone dot or a lone backslash, is kept as written.
///
/// # Example
///
/// ```
/// use dotted_path::unliteral_field;
///
/// assert_eq!(unliteral_field("a..b"), "a.b");
/// assert_eq!(unliteral_field("\\.a"), ".a");
/// assert_eq!(unliteral_field("a\\b"), "a\\b");
/// ```
pub fn unliteral_field(field: &str) -> String {
    if !field.contains('.') && !field.contains('\\') {
        return field.to_string();
    }
    let chars: Vec<char> = field.chars().collect();
    let mut out = String::with_capacity(field.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match (c, next) {
            ('\\', Some('.')) | ('\\', Some('\\')) | ('.', Some('.')) => {
                out.push(chars[i + 1]);
                i += 2;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}
