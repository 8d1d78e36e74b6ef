use dotted::{join_field, unwrap, wrap, Data, DotsError, Value};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn dotted_write_builds_nested_mappings() {
    let mut b = Data::new();
    b.set("c", "t1").unwrap();
    b.set("d.e", "t2").unwrap();
    assert_eq!(b, json!({"c": "t1", "d": {"e": "t2"}}));
}

#[test]
fn escaped_key_write() {
    let mut b = Data::new();
    b.set("c.d.e\\.f", 1).unwrap();
    b.set("c.d.e\\.g", 2).unwrap();
    assert_eq!(b, json!({"c": {"d": {"e.f": 1, "e.g": 2}}}));
}

#[test]
fn accumulate_into_missing_leaf() {
    let mut b = Data::new();
    assert!(b.get("c1.d").is_null());
    b.accumulate("c1.d", 1).unwrap();
    b.accumulate("c1.d", 2).unwrap();
    assert_eq!(b.get("c1.d"), json!(3));
}

#[test]
fn accumulate_appends_to_lists() {
    let mut b = Data::from_value(json!({"a": [1]}));
    b.accumulate("a", 2).unwrap();
    b.accumulate("a", Value::from(json!([3, 4]))).unwrap();
    assert_eq!(b, json!({"a": [1, 2, 3, 4]}));
}

#[test]
fn accumulate_mismatch_is_an_error() {
    let mut b = Data::from_value(json!({"a": {"x": 1}}));
    let err = b.accumulate("a", 1).unwrap_err();
    assert!(matches!(err, DotsError::AddMismatch { .. }));
    assert_eq!(err.to_string(), "can not add object with int");
}

#[test]
fn auto_vivification_creates_mappings() {
    let root = Value::from(json!({}));
    let mut b = Data::from_value(root.clone());
    b.set("a.b.c", 5).unwrap();
    assert_eq!(b.get("a.b.c"), json!(5));
    assert!(root.as_object().unwrap().get("a").unwrap().is_mapping());
    assert!(b.get("a.b").as_data().is_some());
}

#[test]
fn delete_by_null() {
    let mut b = Data::new();
    b.set("a.b", 5).unwrap();
    b.set("a.b", Value::Null).unwrap();
    assert!(!b.contains("a.b"));
    assert_eq!(b, json!({"a": {}}));
}

#[test]
fn identity_round_trip() {
    let native = Value::from(json!({"a": 1}));
    let back = unwrap(wrap(native.clone()));
    assert!(back.same(&native));

    let data = Data::from_value(native.clone());
    assert!(data.to_value().same(&native));
}

#[test]
fn views_write_through_to_the_original() {
    let native = Value::from(json!({"a": {"b": 1}}));
    let data = Data::from_value(native.clone());
    let mut inner = data.get("a");
    inner.set("c", 2).unwrap();
    assert_eq!(native, json!({"a": {"b": 1, "c": 2}}));
}

#[test]
fn write_through_primitive_is_an_error() {
    let mut b = Data::from_value(json!({"a": 1}));
    assert!(matches!(
        b.set("a.b", 2),
        Err(DotsError::NotContainer { .. })
    ));
}

#[test]
fn reads_through_lists_broadcast() {
    let b = Data::from_value(json!({"a": [{"b": 1}, {"b": 2}, {"c": 3}]}));
    assert_eq!(b.get("a.b"), json!([1, 2]));
}

proptest! {
    #[test]
    fn set_then_get_returns_value(
        segments in prop::collection::vec("[a-z][a-z.]{0,4}[a-z]", 1..5),
        n in any::<i64>(),
    ) {
        let path = join_field(segments.as_slice());
        let mut b = Data::new();
        b.set(&path, n).unwrap();
        prop_assert_eq!(b.get(&path), json!(n));
    }
}
