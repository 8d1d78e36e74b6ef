use dotted_path::{
    concat_field, join_field, literal_field, relative_field, split_field, startswith_field,
    unliteral_field,
};
use proptest::prelude::*;

fn key() -> impl Strategy<Value = String> {
    "[a-z.\\\\]{1,8}"
}

fn plain_key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

proptest! {
    #[test]
    fn unliteral_reverses_literal(s in "[a-z.\\\\]{0,12}") {
        prop_assert_eq!(unliteral_field(&literal_field(&s)), s);
    }

    #[test]
    fn split_reverses_join(segments in prop::collection::vec(key(), 0..5)) {
        let segments: Vec<String> = segments.into_iter().filter(|s| s != "..").collect();
        let path = join_field(&segments);
        prop_assert_eq!(split_field(&path).unwrap(), segments);
    }

    #[test]
    fn concat_of_relative_restores_field(
        field in prop::collection::vec(plain_key(), 1..4),
        parent in prop::collection::vec(plain_key(), 1..4),
    ) {
        let field = join_field(&field);
        let parent = join_field(&parent);
        let rel = relative_field(&field, &parent).unwrap();
        prop_assert_eq!(concat_field(&[parent.as_str(), rel.as_str()]).unwrap(), field);
    }

    #[test]
    fn joined_child_starts_with_parent(
        parent in prop::collection::vec(key(), 1..3),
        child in key(),
    ) {
        prop_assume!(parent.iter().all(|s| s != ".."));
        let parent_path = join_field(&parent);
        let mut all = parent.clone();
        all.push(child);
        prop_assert!(startswith_field(&join_field(&all), &parent_path));
    }
}
