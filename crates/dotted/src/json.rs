//! JSON interop.
//!
//! Every view serializes exactly like the native value behind it, so a
//! wrapped structure can be handed to `serde_json` directly. Cyclic values
//! fail instead of recursing forever.

use crate::data::Data;
use crate::dot::{wrap, Dot};
use crate::error::DotsError;
use crate::list::FlatList;
use crate::null::Null;
use crate::object::DataObject;
use crate::value::{List, Object, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::cell::RefCell;

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::Str(s),
            JsonValue::Array(items) => {
                Value::List(List::from_vec(items.into_iter().map(Value::from).collect()))
            }
            JsonValue::Object(entries) => {
                let object = Object::new();
                for (k, v) in entries {
                    object.insert(k, Value::from(v));
                }
                Value::Object(object)
            }
        }
    }
}

impl Value {
    /// Convert to a `serde_json` tree. Null mapping entries are dropped and a
    /// non-finite float becomes `null`.
    ///
    /// # Errors
    ///
    /// [`DotsError::Cycle`] naming the path where the cycle closes.
    pub fn to_json(&self) -> Result<JsonValue, DotsError> {
        to_json_with(self, &mut Vec::new(), &mut Vec::new())
    }
}

fn to_json_with(
    value: &Value,
    stack: &mut Vec<usize>,
    path: &mut Vec<String>,
) -> Result<JsonValue, DotsError> {
    if let Some(id) = value.identity() {
        if stack.contains(&id) {
            return Err(DotsError::Cycle {
                path: dotted_path::join_field(path.as_slice()),
            });
        }
        stack.push(id);
    }
    let out = match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Str(s) => JsonValue::String(s.clone()),
        Value::List(list) => {
            let mut items = Vec::with_capacity(list.len());
            for (i, item) in list.to_vec().iter().enumerate() {
                path.push(i.to_string());
                items.push(to_json_with(item, stack, path)?);
                path.pop();
            }
            JsonValue::Array(items)
        }
        mapping => {
            let mut entries = serde_json::Map::new();
            for (k, v) in mapping.mapping_entries().unwrap_or_default() {
                path.push(k.clone());
                entries.insert(k, to_json_with(&v, stack, path)?);
                path.pop();
            }
            JsonValue::Object(entries)
        }
    };
    if value.identity().is_some() {
        stack.pop();
    }
    Ok(out)
}

/// Serializes one value while tracking the containers above it.
struct Guarded<'a> {
    value: &'a Value,
    stack: &'a RefCell<Vec<usize>>,
}

impl Guarded<'_> {
    fn enter<E: serde::ser::Error>(&self, id: usize) -> Result<(), E> {
        let mut stack = self.stack.borrow_mut();
        if stack.contains(&id) {
            return Err(E::custom("cyclic structure can not be serialized"));
        }
        stack.push(id);
        Ok(())
    }

    fn leave(&self) {
        self.stack.borrow_mut().pop();
    }

    fn child<'b>(&'b self, value: &'b Value) -> Guarded<'b> {
        Guarded {
            value,
            stack: self.stack,
        }
    }
}

impl Serialize for Guarded<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(list) => {
                self.enter::<S::Error>(list.id())?;
                let items = list.to_vec();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in &items {
                    seq.serialize_element(&self.child(item))?;
                }
                self.leave();
                seq.end()
            }
            mapping => {
                if let Some(id) = mapping.identity() {
                    self.enter::<S::Error>(id)?;
                }
                let entries = mapping.mapping_entries().unwrap_or_default();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in &entries {
                    map.serialize_entry(k, &self.child(v))?;
                }
                self.leave();
                map.end()
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let stack = RefCell::new(Vec::new());
        Guarded { value: self, stack: &stack }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Value::from)
    }
}

macro_rules! serialize_as_value {
    ($($t:ty),*) => {
        $(
            impl Serialize for $t {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    self.to_value().serialize(serializer)
                }
            }
        )*
    };
}

serialize_as_value!(Dot, Data, FlatList, DataObject);

impl Serialize for Null {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

impl PartialEq<JsonValue> for Value {
    fn eq(&self, other: &JsonValue) -> bool {
        self == &Value::from(other.clone())
    }
}

macro_rules! loose_eq_json {
    ($($t:ty),*) => {
        $(
            impl PartialEq<JsonValue> for $t {
                fn eq(&self, other: &JsonValue) -> bool {
                    self.loose_eq(&wrap(Value::from(other.clone()))) == Some(true)
                }
            }
        )*
    };
}

loose_eq_json!(Dot, Data, FlatList, Null);

impl PartialEq<JsonValue> for DataObject {
    fn eq(&self, other: &JsonValue) -> bool {
        self.to_value() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_order_and_kinds() {
        let v = Value::from(json!({"b": 1, "a": 1.5, "c": [true, null, "x"]}));
        assert_eq!(v.as_object().unwrap().keys(), vec!["b", "a", "c"]);
        assert!(matches!(v.as_object().unwrap().get("b"), Some(Value::Int(1))));
        assert!(matches!(v.as_object().unwrap().get("a"), Some(Value::Float(_))));
    }

    #[test]
    fn test_to_json_drops_null_entries() {
        let v = Value::from(json!({"a": null, "b": [null]}));
        assert_eq!(v.to_json().unwrap(), json!({"b": [null]}));
    }

    #[test]
    fn test_to_json_rejects_cycles() {
        let root = Object::new();
        let child = Object::new();
        child.insert("back", Value::Object(root.clone()));
        root.insert("a", Value::Object(child));
        match Value::Object(root).to_json() {
            Err(DotsError::Cycle { path }) => assert_eq!(path, "a.back"),
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_shared_substructure_is_not_a_cycle() {
        let shared = Value::from(json!({"x": 1}));
        let root = Object::new();
        root.insert("a", shared.clone());
        root.insert("b", shared);
        assert_eq!(
            serde_json::to_value(Value::Object(root)).unwrap(),
            json!({"a": {"x": 1}, "b": {"x": 1}})
        );
    }

    #[test]
    fn test_serialize_rejects_cycles() {
        let list = List::new();
        list.push(Value::List(list.clone()));
        assert!(serde_json::to_string(&Value::List(list)).is_err());
    }

    #[test]
    fn test_wrapped_serializes_like_native() {
        let native = Value::from(json!({"a": [1, {"b": "c"}]}));
        let wrapped = wrap(native.clone());
        assert_eq!(
            serde_json::to_string(&wrapped).unwrap(),
            serde_json::to_string(&native).unwrap()
        );
        assert_eq!(serde_json::to_string(&Null::new()).unwrap(), "null");
    }

    #[test]
    fn test_deserialize() {
        let v: Value = serde_json::from_str(r#"{"a": [1, 2.5]}"#).unwrap();
        assert_eq!(v, json!({"a": [1, 2.5]}));
    }
}
