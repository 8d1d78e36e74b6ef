//! Small helpers over values and views.

use crate::data::Data;
use crate::dot::{wrap, Dot};
use crate::error::DotsError;
use crate::list::FlatList;
use crate::null::Null;
use crate::value::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// The first non-null value, wrapped; [`Null`] when there is none.
///
/// # Example
///
/// ```
/// use dotted::{coalesce, Value};
/// use serde_json::json;
///
/// let found = coalesce([Value::Null, Value::from(2), Value::from(3)]);
/// assert_eq!(found, json!(2));
/// ```
pub fn coalesce<I, T>(values: I) -> Dot
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    values
        .into_iter()
        .map(Into::into)
        .find(|v: &Value| !v.is_null())
        .map(wrap)
        .unwrap_or_else(|| Dot::Null(Null::new()))
}

/// A [`Data`] built from paired keys and values. Keys are paths, so
/// `"a.b"` nests.
pub fn zip<K, V>(
    keys: impl IntoIterator<Item = K>,
    values: impl IntoIterator<Item = V>,
) -> Result<Data, DotsError>
where
    K: AsRef<str>,
    V: Into<Value>,
{
    let mut out = Data::new();
    for (k, v) in keys.into_iter().zip(values) {
        out.set(k.as_ref(), v)?;
    }
    Ok(out)
}

/// Null becomes an empty list, a list stays itself (same handle), anything
/// else becomes a one-element list.
pub fn listwrap(value: impl Into<Value>) -> FlatList {
    match value.into() {
        Value::Null => FlatList::new(),
        Value::List(list) => FlatList::from(list),
        other => FlatList::from_vec(vec![other]),
    }
}

/// Lists of zero and one element become null and the element.
pub fn unwraplist(value: impl Into<Value>) -> Dot {
    match value.into() {
        Value::List(list) => match list.len() {
            0 => Dot::Null(Null::new()),
            1 => wrap(list.get(0).unwrap_or_default()),
            _ => wrap(Value::List(list)),
        },
        other => wrap(other),
    }
}

/// Last element of a list; any other value is its own last element.
pub fn last(value: impl Into<Value>) -> Dot {
    match value.into() {
        Value::List(list) => FlatList::from(list).last(),
        other => wrap(other),
    }
}

/// Null, or an empty list.
pub fn is_null(value: impl Into<Value>) -> bool {
    match value.into() {
        Value::Null => true,
        Value::List(list) => list.is_empty(),
        _ => false,
    }
}

pub fn is_not_null(value: impl Into<Value>) -> bool {
    !is_null(value)
}

/// Null, an empty list or an empty string. Mappings, even empty ones, are
/// never missing.
pub fn is_missing(value: impl Into<Value>) -> bool {
    match value.into() {
        Value::Null => true,
        Value::List(list) => list.is_empty(),
        Value::Str(s) => s.is_empty(),
        _ => false,
    }
}

pub fn exists(value: impl Into<Value>) -> bool {
    !is_missing(value)
}

/// A weak hash: lists hash like their first element and mappings like their
/// first value, so it is cheap on large structures and collides often.
pub fn hash_value(value: impl Into<Value>) -> u64 {
    let value = value.into();
    let representative = match &value {
        Value::List(list) => return hash_value(list.get(0).unwrap_or_default()),
        mapping if mapping.is_mapping() => mapping
            .mapping_entries()
            .and_then(|entries| entries.into_iter().next())
            .map(|(_, v)| v),
        _ => None,
    };
    match representative {
        Some(first) => hash_value(first),
        None if value.is_mapping() => hash_of(&Value::Null),
        None => hash_of(&value),
    }
}

fn hash_of(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(j: serde_json::Value) -> Value {
        Value::from(j)
    }

    #[test]
    fn test_coalesce() {
        assert!(coalesce(Vec::<Value>::new()).is_null());
        assert!(coalesce([Value::Null, Value::Null]).is_null());
        assert_eq!(coalesce([Value::Null, v(json!({"a": 1}))]), json!({"a": 1}));
    }

    #[test]
    fn test_zip_nests_dotted_keys() {
        let out = zip(["a.b", "c"], [1, 2]).unwrap();
        assert_eq!(out, json!({"a": {"b": 1}, "c": 2}));
    }

    #[test]
    fn test_listwrap() {
        assert!(listwrap(Value::Null).is_empty());
        assert_eq!(listwrap(3), json!([3]));
        let native = v(json!([1, 2]));
        assert!(listwrap(native.clone()).to_value().same(&native));
    }

    #[test]
    fn test_unwraplist() {
        assert!(unwraplist(v(json!([]))).is_null());
        assert_eq!(unwraplist(v(json!([4]))), json!(4));
        assert_eq!(unwraplist(v(json!([4, 5]))), json!([4, 5]));
        assert_eq!(unwraplist(6), json!(6));
    }

    #[test]
    fn test_last() {
        assert_eq!(last(v(json!([1, 2]))), json!(2));
        assert!(last(v(json!([]))).is_null());
        assert_eq!(last("x"), json!("x"));
    }

    #[test]
    fn test_null_predicates() {
        assert!(is_null(Value::Null));
        assert!(is_null(Null::new()));
        assert!(is_null(v(json!([]))));
        assert!(!is_null(v(json!({}))));
        assert!(is_not_null(0));
        assert!(is_missing(""));
        assert!(!is_missing(v(json!({}))));
        assert!(exists(false));
    }

    #[test]
    fn test_hash_value_is_weak() {
        assert_eq!(hash_value(v(json!([1, 2]))), hash_value(v(json!([1, 3]))));
        assert_eq!(hash_value(v(json!({"a": 1, "b": 2}))), hash_value(1));
        assert_eq!(hash_value(v(json!([]))), hash_value(Value::Null));
    }
}
