use dotted_path::{
    concat_field, endswith_field, join_field, literal_field, relative_field, split_field,
    split_field_lenient, startswith_field, tail_field, unliteral_field, PathError,
};

#[test]
fn split_field_matrix() {
    let cases: &[(&str, &[&str])] = &[
        ("", &[]),
        (".", &[]),
        ("a", &["a"]),
        ("a.b", &["a", "b"]),
        ("a..b", &["a.b"]),
        ("a..b.c", &["a.b", "c"]),
        ("..", &[".."]),
        ("..a", &["..", "a"]),
        ("...a.b", &["..", "..", "a", "b"]),
        ("c.d.e\\.f", &["c", "d", "e.f"]),
        ("meta\\.stats", &["meta.stats"]),
        ("a\\\\", &["a\\"]),
    ];

    for (path, expected) in cases {
        let segments = split_field(path).expect("valid path");
        assert_eq!(segments, *expected, "path {path:?}");
    }
}

#[test]
fn split_field_odd_dots_matrix() {
    for path in ["a...b", "a...", "x.y.....z"] {
        assert_eq!(
            split_field(path),
            Err(PathError::OddDots {
                path: path.to_string()
            })
        );
        assert!(!split_field_lenient(path).is_empty());
    }
}

#[test]
fn join_field_matrix() {
    let cases: &[(&[&str], &str)] = &[
        (&[], "."),
        (&["a"], "a"),
        (&["a", "b"], "a.b"),
        (&["a.b", "c"], "a..b.c"),
        (&["..", "a"], "..a"),
        (&["..", "..", "a"], "...a"),
        (&["a", "..", ".."], ".."),
        (&["e.f."], "e..f\\."),
    ];

    for (segments, expected) in cases {
        assert_eq!(join_field(segments), *expected, "segments {segments:?}");
    }
}

#[test]
fn literal_field_matrix() {
    let cases = [
        ("a", "a"),
        ("a.b", "a..b"),
        ("a.b.c", "a..b..c"),
        (".hidden", "\\.hidden"),
        ("trailing.", "trailing\\."),
        ("back\\slash", "back\\\\slash"),
    ];

    for (key, expected) in cases {
        assert_eq!(literal_field(key), expected);
        assert_eq!(unliteral_field(expected), key);
    }
}

#[test]
fn concat_and_relative_matrix() {
    assert_eq!(concat_field(&["a", "b.c"]).unwrap(), "a.b.c");
    assert_eq!(concat_field(&["a.b", "..c"]).unwrap(), "a.c");
    assert_eq!(concat_field(&["a.b", "...c"]).unwrap(), "c");
    assert_eq!(concat_field(&["a", "...c"]).unwrap(), "..c");

    assert_eq!(relative_field("a.b.c", "a.b").unwrap(), "c");
    assert_eq!(relative_field("a.b.c", "a.x").unwrap(), "..b.c");
    assert_eq!(relative_field("q", "a").unwrap(), "..q");
}

#[test]
fn startswith_and_endswith_matrix() {
    let starts = [
        ("a.b.c", "a", true),
        ("a.b.c", "a.b", true),
        ("a.b.c", "a.b.c", true),
        ("a.bc", "a.b", false),
        ("a..b", "a", false),
        ("abc", "a", false),
        ("x", ".", true),
        ("a.y\\\\", "a", true),
    ];
    for (field, prefix, expected) in starts {
        assert_eq!(
            startswith_field(field, prefix),
            expected,
            "{field:?} startswith {prefix:?}"
        );
    }

    let ends = [
        ("a.b.c", "c", true),
        ("a.b.c", "b.c", true),
        ("a.bc", "c", false),
        ("a..c", "c", false),
        ("c", "c", true),
        ("a", ".", true),
        ("x\\\\.b", "b", true),
        ("x\\.b", "b", false),
    ];
    for (field, suffix, expected) in ends {
        assert_eq!(
            endswith_field(field, suffix),
            expected,
            "{field:?} endswith {suffix:?}"
        );
    }
}

#[test]
fn tail_field_matrix() {
    assert_eq!(
        tail_field("a.b.c").unwrap(),
        (Some("a".to_string()), "b.c".to_string())
    );
    assert_eq!(
        tail_field("a..b.c").unwrap(),
        (Some("a.b".to_string()), "c".to_string())
    );
    assert_eq!(tail_field("").unwrap(), (None, ".".to_string()));
    assert!(tail_field("a...b").is_err());
}
