//! Mapping view with dotted-path access.

use crate::access::{get_steps, read_steps, set_steps, write_steps};
use crate::dot::{wrap, Dot};
use crate::error::DotsError;
use crate::leaves::leaves;
use crate::merge::{add_leaf, add_mapping, coalesce_into};
use crate::value::{Map, Object, Value};
use dotted_path::is_self;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitOr};

/// A view over one backing mapping.
///
/// `Data` holds the mapping's handle, not a copy: writes through the view are
/// writes to the mapping, and [`Data::to_value`] returns the same handle.
///
/// # Example
///
/// ```
/// use dotted::Data;
/// use serde_json::json;
///
/// let mut data = Data::new();
/// data.set("c", "t1").unwrap();
/// data.set("d.e", "t2").unwrap();
/// assert_eq!(data, json!({"c": "t1", "d": {"e": "t2"}}));
///
/// assert_eq!(data.get("d.e"), json!("t2"));
/// assert!(data.get("d.x.y").is_null());
/// ```
#[derive(Clone)]
pub struct Data {
    value: Value,
}

impl Default for Data {
    fn default() -> Self {
        Data::new()
    }
}

impl Data {
    pub fn new() -> Self {
        Data {
            value: Value::Object(Object::new()),
        }
    }

    /// View over any value. Non-mappings behave as a `Data` that has become
    /// a plain value through a self assignment.
    pub fn from_value(value: impl Into<Value>) -> Self {
        Data {
            value: value.into(),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// The backing value, same handle.
    pub fn to_value(&self) -> Value {
        self.value.clone()
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Read `path`. `"."` (or `""`) is the view itself.
    pub fn get(&self, path: &str) -> Dot {
        if is_self(path) {
            return match &self.value {
                Value::Object(_) | Value::Record(_) => Dot::Data(self.clone()),
                other => wrap(other.clone()),
            };
        }
        get_steps(&self.value, &read_steps(path))
    }

    /// Write `value` at `path`, creating missing mappings on the way.
    ///
    /// A null `value` removes the key. Writing `"."` replaces the backing
    /// value itself.
    ///
    /// # Errors
    ///
    /// - [`DotsError::NotContainer`] when a step lands on a primitive
    /// - [`DotsError::EmptyKey`] for an empty key
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), DotsError> {
        let value = value.into();
        if is_self(path) {
            self.value = if value.is_null() {
                Value::Object(Object::new())
            } else {
                value
            };
            return Ok(());
        }
        set_steps(&self.value, &write_steps(path), value)
    }

    /// Remove `path`. Removing a missing path does nothing.
    pub fn delete(&mut self, path: &str) -> Result<(), DotsError> {
        self.set(path, Value::Null)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_present()
    }

    fn entries(&self) -> Vec<(String, Value)> {
        self.value.mapping_entries().unwrap_or_default()
    }

    /// Keys holding a non-null value.
    pub fn keys(&self) -> Vec<String> {
        self.entries().into_iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<Dot> {
        self.entries().into_iter().map(|(_, v)| wrap(v)).collect()
    }

    /// Entries holding a non-null value, wrapped.
    pub fn items(&self) -> Vec<(String, Dot)> {
        self.entries()
            .into_iter()
            .map(|(k, v)| (k, wrap(v)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, Dot)> {
        self.items().into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove `path` and return what it held.
    pub fn pop(&mut self, path: &str) -> Result<Dot, DotsError> {
        let old = self.get(path);
        if old.is_present() {
            self.delete(path)?;
        }
        Ok(old)
    }

    /// Value at `path`, storing `default` there first if it is missing.
    pub fn setdefault(&mut self, path: &str, default: impl Into<Value>) -> Result<Dot, DotsError> {
        let existing = self.get(path);
        if existing.is_present() {
            return Ok(existing);
        }
        self.set(path, default)?;
        Ok(self.get(path))
    }

    /// New mapping holding the same entries.
    pub fn copy(&self) -> Data {
        match &self.value {
            Value::Object(o) => {
                let map: Map = o.borrow().clone();
                Data::from(map)
            }
            Value::Record(_) => {
                let copy = Object::new();
                for (k, v) in self.entries() {
                    copy.insert(k, v);
                }
                Data::from(copy)
            }
            other => Data::from_value(other.clone()),
        }
    }

    pub fn deep_copy(&self) -> Data {
        Data::from_value(self.value.deep_copy())
    }

    /// Always fails: a view never empties the mapping it shares.
    pub fn clear(&mut self) -> Result<(), DotsError> {
        Err(DotsError::Unsupported { op: "clear" })
    }

    /// Every non-mapping value with its dotted path.
    pub fn leaves(&self, prefix: Option<&str>) -> Vec<(String, Dot)> {
        leaves(&self.value, prefix)
            .into_iter()
            .map(|(k, v)| (k, wrap(v)))
            .collect()
    }

    /// `self | other`: a copy of `self` with `other` filling whatever is
    /// missing, recursively.
    pub fn coalesce(&self, other: impl Into<Value>) -> Result<Data, DotsError> {
        let mut out = self.deep_copy();
        out.coalesce_assign(other)?;
        Ok(out)
    }

    /// `self |= other`. Coalescing with null changes nothing.
    ///
    /// # Errors
    ///
    /// [`DotsError::OpMismatch`] when `other` is neither null nor a mapping.
    pub fn coalesce_assign(&mut self, other: impl Into<Value>) -> Result<(), DotsError> {
        let other = other.into();
        if other.is_null() {
            return Ok(());
        }
        if !other.is_mapping() {
            return Err(DotsError::op_mismatch("coalesce", &self.value, &other));
        }
        if !self.value.is_mapping() {
            return Ok(());
        }
        coalesce_into(&self.value, &other)
    }

    /// `self + other` on a copy of `self`.
    pub fn add(&self, other: impl Into<Value>) -> Result<Data, DotsError> {
        let mut out = self.deep_copy();
        out.add_assign(other)?;
        Ok(out)
    }

    /// `self += other`: numbers sum, lists concatenate, mappings recurse.
    ///
    /// An empty view added to a non-mapping becomes that value.
    ///
    /// # Errors
    ///
    /// [`DotsError::AddMismatch`] when two leaves can not be added.
    pub fn add_assign(&mut self, other: impl Into<Value>) -> Result<(), DotsError> {
        let other = other.into();
        if other.is_null() {
            return Ok(());
        }
        if other.is_mapping() && self.value.is_mapping() {
            return add_mapping(&self.value, &other);
        }
        if self.value.is_mapping() && self.is_empty() {
            self.value = other.deep_copy();
            return Ok(());
        }
        self.value = add_leaf(&self.value, &other)?;
        Ok(())
    }

    /// `data.a.b += value`: adds into the leaf at `path`, or stores `value`
    /// there when the leaf is missing.
    ///
    /// # Example
    ///
    /// ```
    /// use dotted::Data;
    /// use serde_json::json;
    ///
    /// let mut data = Data::new();
    /// data.accumulate("c1.d", 1).unwrap();
    /// data.accumulate("c1.d", 2).unwrap();
    /// assert_eq!(data, json!({"c1": {"d": 3}}));
    /// ```
    pub fn accumulate(&mut self, path: &str, value: impl Into<Value>) -> Result<(), DotsError> {
        let value = value.into();
        if is_self(path) {
            return self.add_assign(value);
        }
        match self.get(path) {
            Dot::Null(null) => null.iadd(value).map(|_| ()),
            existing => {
                let sum = add_leaf(&existing.to_value(), &value)?;
                self.set(path, sum)
            }
        }
    }

    pub fn is_present(&self) -> bool {
        true
    }

    pub fn is_non_empty(&self) -> bool {
        !self.is_empty()
    }

    /// A view is truthy even when empty: it exists.
    pub fn is_truthy(&self) -> bool {
        true
    }

    /// `None` against the sentinel, structural equality otherwise.
    pub fn loose_eq(&self, other: &Dot) -> Option<bool> {
        match other {
            Dot::Null(_) => None,
            other => Some(self.value == other.to_value()),
        }
    }
}

impl From<Object> for Data {
    fn from(object: Object) -> Self {
        Data {
            value: Value::Object(object),
        }
    }
}

impl From<Map> for Data {
    fn from(map: Map) -> Self {
        Data::from(Object::from_map(map))
    }
}

impl PartialEq for Data {
    fn eq(&self, other: &Data) -> bool {
        self.value == other.value
    }
}

impl PartialEq<Value> for Data {
    fn eq(&self, other: &Value) -> bool {
        &self.value == other
    }
}

impl PartialEq<Dot> for Data {
    fn eq(&self, other: &Dot) -> bool {
        self.loose_eq(other) == Some(true)
    }
}

impl Hash for Data {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Data({:?})", self.value)
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T: Into<Value>> BitOr<T> for &Data {
    type Output = Result<Data, DotsError>;

    fn bitor(self, rhs: T) -> Self::Output {
        self.coalesce(rhs)
    }
}

impl<T: Into<Value>> Add<T> for &Data {
    type Output = Result<Data, DotsError>;

    fn add(self, rhs: T) -> Self::Output {
        Data::add(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(v: serde_json::Value) -> Data {
        Data::from_value(v)
    }

    #[test]
    fn test_set_null_removes_key() {
        let mut d = data(json!({"a": {"b": 5}}));
        d.set("a.b", Value::Null).unwrap();
        assert!(!d.contains("a.b"));
        assert_eq!(d, json!({"a": {}}));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut d = data(json!({"a": 1}));
        d.delete("x.y.z").unwrap();
        assert_eq!(d, json!({"a": 1}));
    }

    #[test]
    fn test_self_path_read_and_write() {
        let mut d = data(json!({"a": 1}));
        assert_eq!(d.get("."), json!({"a": 1}));
        d.set(".", 7).unwrap();
        assert_eq!(d.get("."), json!(7));
    }

    #[test]
    fn test_items_skip_null_values() {
        let d = data(json!({"a": 1, "b": null, "c": [1]}));
        assert_eq!(d.keys(), vec!["a", "c"]);
        assert_eq!(d.len(), 2);
        let items = d.items();
        assert_eq!(items[1].1, json!([1]));
    }

    #[test]
    fn test_pop_and_setdefault() {
        let mut d = data(json!({"a": {"b": 1}}));
        assert_eq!(d.pop("a.b").unwrap(), json!(1));
        assert!(d.pop("a.b").unwrap().is_null());
        assert_eq!(d.setdefault("a.c", 2).unwrap(), json!(2));
        assert_eq!(d.setdefault("a.c", 3).unwrap(), json!(2));
    }

    #[test]
    fn test_clear_is_unsupported() {
        let mut d = Data::new();
        assert!(matches!(
            d.clear(),
            Err(DotsError::Unsupported { op: "clear" })
        ));
    }

    #[test]
    fn test_copy_is_shallow() {
        let d = data(json!({"a": {"b": 1}}));
        let c = d.copy();
        assert!(!c.to_value().same(&d.to_value()));
        assert!(c.get("a").to_value().same(&d.get("a").to_value()));
        let deep = d.deep_copy();
        assert!(!deep.get("a").to_value().same(&d.get("a").to_value()));
    }

    #[test]
    fn test_empty_data_is_truthy_and_not_null() {
        let d = Data::new();
        assert!(d.is_truthy());
        assert!(!d.is_non_empty());
        assert_eq!(d.loose_eq(&Dot::Null(crate::Null::new())), None);
        assert!(d != Dot::Null(crate::Null::new()));
    }

    #[test]
    fn test_add_assign_on_empty_becomes_value() {
        let mut d = Data::new();
        d.add_assign(5).unwrap();
        assert_eq!(d.get("."), json!(5));
    }

    #[test]
    fn test_add_assign_number_into_mapping_fails() {
        let mut d = data(json!({"a": 1}));
        let err = d.add_assign(5).unwrap_err();
        assert_eq!(err.to_string(), "can not add object with int");
    }

    #[test]
    fn test_coalesce_operator() {
        let a = data(json!({"a": 1, "b": {"x": 1}}));
        let out = (&a | Value::from(json!({"a": 2, "b": {"y": 2}, "c": 3}))).unwrap();
        assert_eq!(out, json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
        assert_eq!(a, json!({"a": 1, "b": {"x": 1}}));
    }

    #[test]
    fn test_coalesce_with_non_mapping_fails() {
        let mut d = data(json!({"a": 1}));
        let err = d.coalesce_assign(5).unwrap_err();
        assert_eq!(err.to_string(), "can not coalesce object with int");
        assert!(matches!(&d | "x", Err(DotsError::OpMismatch { .. })));
        d.coalesce_assign(Value::Null).unwrap();
        assert_eq!(d, json!({"a": 1}));
    }

    #[test]
    fn test_escaped_key_write() {
        let mut d = Data::new();
        d.set("c.d.e\\.f", 1).unwrap();
        d.set("c.d.e\\.g", 2).unwrap();
        assert_eq!(d, json!({"c": {"d": {"e.f": 1, "e.g": 2}}}));
        assert_eq!(d.get("c.d.e..f"), json!(1));
    }
}
