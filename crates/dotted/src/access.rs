//! Path walking over native values: the read and write rules every view
//! shares.
//!
//! Reads never fail. A missing step produces a [`Null`] that remembers the
//! container and key it came from, so a later write through it can create
//! the missing structure. A list met during a walk broadcasts the rest of the
//! path over its elements.

use crate::dot::{wrap, Dot};
use crate::error::DotsError;
use crate::list::FlatList;
use crate::null::Null;
use crate::object::Record;
use crate::value::{Object, Value};
use dotted_path::{split_field, split_field_lenient};

/// Steps for a read. Never fails.
pub(crate) fn read_steps(path: &str) -> Vec<String> {
    split_field_lenient(path)
}

/// Steps for a lenient write: a malformed path is logged and decoded leniently.
pub(crate) fn write_steps(path: &str) -> Vec<String> {
    match split_field(path) {
        Ok(steps) => steps,
        Err(err) => {
            tracing::warn!(path, %err, "decoding malformed path leniently");
            split_field_lenient(path)
        }
    }
}

/// Field names matching `key` when case is ignored.
pub(crate) fn lower_match(key: &str, candidates: &[String]) -> Vec<String> {
    let key = key.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.to_lowercase() == key)
        .cloned()
        .collect()
}

/// One literal step. `None` when the key is missing or holds null.
pub(crate) fn read_key(container: &Value, key: &str) -> Option<Value> {
    let found = match container {
        Value::Object(o) => o.get(key),
        Value::List(l) => key.parse::<usize>().ok().and_then(|i| l.get(i)),
        Value::Record(r) => read_field(r, key),
        _ => None,
    };
    found.filter(|v| !v.is_null())
}

fn read_field(record: &Record, key: &str) -> Option<Value> {
    let fields = record.fields();
    if fields.iter().any(|f| f == key) {
        return record.get_field(key);
    }
    let matches = lower_match(key, &fields);
    match matches.as_slice() {
        [] => None,
        [only] => record.get_field(only),
        _ => {
            tracing::warn!(path = key, candidates = ?matches, "ambiguous field name");
            None
        }
    }
}

/// One literal write. A null `value` removes the key from a mapping.
pub(crate) fn write_key(container: &Value, key: &str, value: Value) -> Result<(), DotsError> {
    if key.is_empty() {
        return Err(DotsError::EmptyKey);
    }
    match container {
        Value::Object(o) => {
            if value.is_null() {
                o.remove(key);
            } else {
                o.insert(key, value);
            }
            Ok(())
        }
        Value::List(l) => match key.parse::<usize>() {
            Ok(index) => {
                l.set(index, value);
                Ok(())
            }
            Err(_) => {
                for element in l.to_vec() {
                    if !element.is_null() {
                        write_key(&element, key, value.clone())?;
                    }
                }
                Ok(())
            }
        },
        Value::Record(r) => write_field(r, key, value),
        Value::Null => Err(DotsError::PathNotFound {
            path: key.to_string(),
        }),
        other => Err(DotsError::NotContainer {
            key: key.to_string(),
            kind: other.type_name(),
        }),
    }
}

fn write_field(record: &Record, key: &str, value: Value) -> Result<(), DotsError> {
    let fields = record.fields();
    if fields.iter().any(|f| f == key) {
        return record.set_field(key, value);
    }
    let matches = lower_match(key, &fields);
    match matches.as_slice() {
        [] => record.set_field(key, value),
        [only] => record.set_field(only, value),
        _ => Err(DotsError::AmbiguousPath {
            path: key.to_string(),
            candidates: matches,
        }),
    }
}

/// Resolve `steps` from `start`.
pub(crate) fn get_steps(start: &Value, steps: &[String]) -> Dot {
    let mut current = start.clone();
    for (i, step) in steps.iter().enumerate() {
        if let Value::List(list) = &current {
            return FlatList::from(list.clone()).get_steps(&steps[i..]);
        }
        match read_key(&current, step) {
            Some(next) => current = next,
            None => {
                let null = Null::at(current, step.clone());
                return Dot::Null(null.get_steps(&steps[i + 1..]));
            }
        }
    }
    wrap(current)
}

/// Write `value` at `steps` below `root`, creating missing mappings on the way.
///
/// A null `value` deletes; deleting below a missing step does nothing.
pub(crate) fn set_steps(root: &Value, steps: &[String], value: Value) -> Result<(), DotsError> {
    let Some((last, init)) = steps.split_last() else {
        return Err(DotsError::EmptyKey);
    };
    let mut current = root.clone();
    for (i, step) in init.iter().enumerate() {
        if let Value::List(list) = &current {
            return broadcast(list.to_vec(), &steps[i..], value);
        }
        current = match read_key(&current, step) {
            Some(next) if next.is_container() => next,
            Some(next) => {
                return Err(DotsError::NotContainer {
                    key: steps[i + 1].clone(),
                    kind: next.type_name(),
                })
            }
            None if value.is_null() => return Ok(()),
            None => {
                let created = Value::Object(Object::new());
                write_key(&current, step, created.clone())?;
                created
            }
        };
    }
    write_key(&current, last, value)
}

fn broadcast(elements: Vec<Value>, steps: &[String], value: Value) -> Result<(), DotsError> {
    for element in elements {
        if !element.is_null() {
            set_steps(&element, steps, value.clone())?;
        }
    }
    Ok(())
}

/// Read `path` from any value, rejecting malformed paths.
///
/// # Errors
///
/// [`DotsError::Path`] when the path has an odd run of dots.
///
/// # Example
///
/// ```
/// use dotted::{get_attr, Value};
/// use serde_json::json;
///
/// let v = Value::from(json!({"a": {"b": 1}}));
/// assert_eq!(get_attr(&v, "a.b").unwrap(), json!(1));
/// assert!(get_attr(&v, "a.x").unwrap().is_null());
/// assert!(get_attr(&v, "a...b").is_err());
/// ```
pub fn get_attr(target: &Value, path: &str) -> Result<Dot, DotsError> {
    let steps = split_field(path)?;
    Ok(get_steps(target, &steps))
}

/// Write `value` at `path` and return the value it replaced.
///
/// Unlike the view setters, every step before the last must already exist.
/// Field names on records fall back to a case-insensitive match.
///
/// # Errors
///
/// - [`DotsError::Path`] for a malformed path
/// - [`DotsError::EmptyKey`] for the self path
/// - [`DotsError::PathNotFound`] when an intermediate step is missing
/// - [`DotsError::AmbiguousPath`] when several record fields match
pub fn set_attr(target: &Value, path: &str, value: impl Into<Value>) -> Result<Dot, DotsError> {
    let value = value.into();
    let steps = split_field(path)?;
    let Some((last, init)) = steps.split_last() else {
        return Err(DotsError::EmptyKey);
    };
    if target.is_null() {
        return Err(DotsError::PathNotFound {
            path: path.to_string(),
        });
    }
    let mut current = target.clone();
    for (i, step) in init.iter().enumerate() {
        if current.is_list() {
            let old = get_steps(&current, &steps[i..]);
            set_steps(&current, &steps[i..], value)?;
            return Ok(old);
        }
        current = read_key(&current, step).ok_or_else(|| DotsError::PathNotFound {
            path: path.to_string(),
        })?;
    }
    let old = get_steps(&current, std::slice::from_ref(last));
    write_key(&current, last, value)?;
    Ok(old)
}
