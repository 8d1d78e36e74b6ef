//! Structural merges: recursive defaults, additive merge and coalescing.
//!
//! All three walk two mappings side by side. A stack of the (target, source)
//! identity pairs being merged stops the walk when a cycle brings the same
//! pair around again.

use crate::access::{read_key, write_key};
use crate::error::DotsError;
use crate::value::{List, Object, Value};

type Stack = Vec<(usize, usize)>;

/// Fill `target` from `sources`, most important first.
///
/// For every key a source has and the target lacks (or holds an empty list),
/// a deep copy of the source value is stored, so no two targets ever share a
/// sub-structure taken from a source. Mappings on both sides merge
/// recursively. A list on either side concatenates, target first. Any other
/// value already in the target wins. A null `target` starts as an empty
/// mapping; the (same-identity) target is returned.
///
/// # Example
///
/// ```
/// use dotted::{set_default, Value};
/// use serde_json::json;
///
/// let a = Value::from(json!({"x": 1}));
/// let b = Value::from(json!({"x": 2, "y": 2}));
/// let out = set_default(Value::from(json!({})), &[a.clone(), b]).unwrap();
/// assert_eq!(out, json!({"x": 1, "y": 2}));
/// assert_eq!(a, json!({"x": 1}));
/// ```
pub fn set_default(target: impl Into<Value>, sources: &[Value]) -> Result<Value, DotsError> {
    let mut target = target.into();
    if target.is_null() {
        target = Value::Object(Object::new());
    }
    if !target.is_mapping() {
        return Ok(target);
    }
    let mut stack = Stack::new();
    for source in sources.iter().filter(|s| s.is_mapping()) {
        default_into(&target, source, &mut stack)?;
    }
    Ok(target)
}

fn pair(target: &Value, source: &Value) -> (usize, usize) {
    (
        target.identity().unwrap_or_default(),
        source.identity().unwrap_or_default(),
    )
}

/// Store into a mapping without the path-level key checks.
fn put(target: &Value, key: &str, value: Value) -> Result<(), DotsError> {
    match target {
        Value::Object(o) => {
            o.insert(key, value);
            Ok(())
        }
        other => write_key(other, key, value),
    }
}

fn listwrap_vec(value: &Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::List(l) => l.to_vec(),
        other => vec![other.clone()],
    }
}

fn default_into(target: &Value, source: &Value, stack: &mut Stack) -> Result<(), DotsError> {
    let key_pair = pair(target, source);
    if target.same(source) || stack.contains(&key_pair) {
        return Ok(());
    }
    stack.push(key_pair);
    for (key, incoming) in source.mapping_entries().unwrap_or_default() {
        match read_key(target, &key) {
            None => put(target, &key, incoming.deep_copy())?,
            Some(Value::List(l)) if l.is_empty() => put(target, &key, incoming.deep_copy())?,
            Some(existing) if existing.is_list() || incoming.is_list() => {
                let mut merged = listwrap_vec(&existing);
                merged.extend(listwrap_vec(&incoming.deep_copy()));
                put(target, &key, Value::List(List::from_vec(merged)))?;
            }
            Some(existing) if existing.is_mapping() && incoming.is_mapping() => {
                default_into(&existing, &incoming, stack)?;
            }
            Some(_) => {}
        }
    }
    stack.pop();
    Ok(())
}

/// Recursive `target += other` over two mappings.
pub(crate) fn add_mapping(target: &Value, other: &Value) -> Result<(), DotsError> {
    add_mapping_with(target, other, &mut Stack::new())
}

fn add_mapping_with(target: &Value, other: &Value, stack: &mut Stack) -> Result<(), DotsError> {
    let key_pair = pair(target, other);
    if stack.contains(&key_pair) {
        return Err(DotsError::Cycle {
            path: "add".to_string(),
        });
    }
    stack.push(key_pair);
    for (key, incoming) in other.mapping_entries().unwrap_or_default() {
        match read_key(target, &key) {
            None => put(target, &key, incoming.deep_copy())?,
            Some(existing) => {
                let sum = add_leaf_with(&existing, &incoming, stack)?;
                if !sum.same(&existing) {
                    put(target, &key, sum)?;
                }
            }
        }
    }
    stack.pop();
    Ok(())
}

/// Add `incoming` into `existing`.
///
/// Lists and mappings already in place are updated in place and returned;
/// numbers, strings and new lists come back as new values.
///
/// | incoming | existing | result |
/// |----------|----------|--------|
/// | number   | number   | sum (integer overflow gives a float) |
/// | number, string, bool, mapping | list | appended |
/// | list     | anything | `existing` as a list, then the incoming elements |
/// | mapping  | mapping  | recursive add |
/// | string   | string   | concatenation |
///
/// Every other pairing is [`DotsError::AddMismatch`].
pub(crate) fn add_leaf(existing: &Value, incoming: &Value) -> Result<Value, DotsError> {
    add_leaf_with(existing, incoming, &mut Stack::new())
}

fn add_leaf_with(existing: &Value, incoming: &Value, stack: &mut Stack) -> Result<Value, DotsError> {
    if incoming.is_null() {
        return Ok(existing.clone());
    }
    if existing.is_null() {
        return Ok(incoming.deep_copy());
    }
    match (existing, incoming) {
        (Value::List(inc_target), _) if !incoming.is_list() => {
            inc_target.push(incoming.deep_copy());
            Ok(existing.clone())
        }
        (_, Value::List(items)) => {
            let mut merged = listwrap_vec(existing);
            merged.extend(items.to_vec().iter().map(Value::deep_copy));
            Ok(Value::List(List::from_vec(merged)))
        }
        (x, y) if x.is_number() && y.is_number() => Ok(sum_numbers(x, y)),
        (x, y) if x.is_mapping() && y.is_mapping() => {
            add_mapping_with(x, y, stack)?;
            Ok(existing.clone())
        }
        (Value::Str(x), Value::Str(y)) => Ok(Value::Str(format!("{x}{y}"))),
        _ => Err(DotsError::add_mismatch(existing, incoming)),
    }
}

pub(crate) fn sum_numbers(x: &Value, y: &Value) -> Value {
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => match a.checked_add(*b) {
            Some(sum) => Value::Int(sum),
            None => Value::Float(*a as f64 + *b as f64),
        },
        _ => Value::Float(x.as_f64().unwrap_or_default() + y.as_f64().unwrap_or_default()),
    }
}

/// Recursive `target |= other`: fill what `target` lacks from `other`.
pub(crate) fn coalesce_into(target: &Value, other: &Value) -> Result<(), DotsError> {
    coalesce_with(target, other, &mut Stack::new())
}

fn coalesce_with(target: &Value, other: &Value, stack: &mut Stack) -> Result<(), DotsError> {
    let key_pair = pair(target, other);
    if target.same(other) || stack.contains(&key_pair) {
        return Ok(());
    }
    stack.push(key_pair);
    for (key, incoming) in other.mapping_entries().unwrap_or_default() {
        match read_key(target, &key) {
            None => put(target, &key, incoming.deep_copy())?,
            Some(existing) if existing.is_mapping() && incoming.is_mapping() => {
                coalesce_with(&existing, &incoming, stack)?;
            }
            Some(_) => {}
        }
    }
    stack.pop();
    Ok(())
}
