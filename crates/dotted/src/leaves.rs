//! Flattening nested mappings to dotted paths, and back.

use crate::access::set_steps;
use crate::data::Data;
use crate::error::DotsError;
use crate::value::{List, Object, Value};
use dotted_path::{join_field, split_field, split_field_lenient};
use std::collections::HashSet;

/// Every non-mapping value below `value` with its dotted path.
///
/// Lists and primitives are leaves. A mapping met again during the walk (a
/// cycle, or a sub-structure shared by two keys) is reported as a leaf
/// instead of being walked twice.
///
/// # Example
///
/// ```
/// use dotted::{leaves, Value};
/// use serde_json::json;
///
/// let v = Value::from(json!({"a": {"b": 1, "c.d": [2]}}));
/// let paths: Vec<String> = leaves(&v, None).into_iter().map(|(k, _)| k).collect();
/// assert_eq!(paths, vec!["a.b", "a.c..d"]);
/// ```
pub fn leaves(value: &Value, prefix: Option<&str>) -> Vec<(String, Value)> {
    let parent = prefix.map(split_field_lenient).unwrap_or_default();
    if !value.is_mapping() {
        return vec![(join_field(parent.as_slice()), value.clone())];
    }
    let mut out = Vec::new();
    let mut visited = HashSet::new();
    walk(value, &mut parent.clone(), &mut visited, &mut out);
    out
}

fn walk(
    value: &Value,
    path: &mut Vec<String>,
    visited: &mut HashSet<usize>,
    out: &mut Vec<(String, Value)>,
) {
    if let Some(id) = value.identity() {
        visited.insert(id);
    }
    for (key, child) in value.mapping_entries().unwrap_or_default() {
        path.push(key);
        let seen = child.identity().is_some_and(|id| visited.contains(&id));
        if child.is_mapping() && !seen {
            walk(&child, path, visited, out);
        } else {
            out.push((join_field(path.as_slice()), child));
        }
        path.pop();
    }
}

/// Inverse of [`leaves`]: dotted keys become nested mappings.
///
/// Returns new structure; the input is not modified. Lists are converted
/// element by element and null entries are dropped.
///
/// # Errors
///
/// - [`DotsError::Path`] for a malformed key
/// - [`DotsError::EmptyKey`] for an empty key
/// - [`DotsError::NotContainer`] when one key is a prefix of another whose
///   value is not a mapping
/// - [`DotsError::Cycle`] for cyclic input
///
/// # Example
///
/// ```
/// use dotted::{leaves_to_data, Value};
/// use serde_json::json;
///
/// let data = leaves_to_data(Value::from(json!({"a.b": 1, "a.c": 2, "d..e": 3}))).unwrap();
/// assert_eq!(data, json!({"a": {"b": 1, "c": 2}, "d.e": 3}));
/// ```
pub fn leaves_to_data(value: impl Into<Value>) -> Result<Data, DotsError> {
    let value = value.into();
    let out = expand(&value, &mut Vec::new())?;
    Ok(Data::from_value(out))
}

fn expand(value: &Value, stack: &mut Vec<usize>) -> Result<Value, DotsError> {
    let Some(id) = value.identity() else {
        return Ok(value.clone());
    };
    if stack.contains(&id) {
        return Err(DotsError::Cycle {
            path: value.type_name(),
        });
    }
    stack.push(id);
    let out = match value {
        Value::List(list) => {
            let items = list
                .to_vec()
                .iter()
                .map(|v| expand(v, stack))
                .collect::<Result<Vec<_>, _>>()?;
            Value::List(List::from_vec(items))
        }
        mapping => {
            let out = Value::Object(Object::new());
            for (key, child) in mapping.mapping_entries().unwrap_or_default() {
                if key.is_empty() {
                    return Err(DotsError::EmptyKey);
                }
                let child = expand(&child, stack)?;
                set_steps(&out, &split_field(&key)?, child)?;
            }
            out
        }
    };
    stack.pop();
    Ok(out)
}
