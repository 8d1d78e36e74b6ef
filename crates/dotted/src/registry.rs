//! Per-type classification of records.
//!
//! [`wrap`](crate::wrap) sees every record as an object. A [`Registry`]
//! passed to the code that needs it can say otherwise for a named record
//! type: treat it as plain data, as an opaque primitive, or as absence.

use crate::data::Data;
use crate::dot::{wrap, Dot};
use crate::null::Null;
use crate::value::Value;
use std::collections::HashMap;

/// How a value is viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Primitive,
    /// A mapping, viewed as [`Data`].
    Data,
    List,
    /// A record, viewed as [`crate::DataObject`].
    Object,
}

/// Kind overrides keyed by record type name.
///
/// # Example
///
/// ```
/// use dotted::{Kind, Registry};
///
/// let mut registry = Registry::new();
/// registry.register("Point", Kind::Data).register("Handle", Kind::Primitive);
/// assert_eq!(registry.kind_of_type("Point"), Kind::Data);
/// assert_eq!(registry.kind_of_type("Other"), Kind::Object);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    overrides: HashMap<String, Kind>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// View records named `type_name` as `kind`. Registering [`Kind::List`]
    /// or [`Kind::Object`] restores the default.
    pub fn register(&mut self, type_name: impl Into<String>, kind: Kind) -> &mut Self {
        let type_name = type_name.into();
        match kind {
            Kind::List | Kind::Object => {
                self.overrides.remove(&type_name);
            }
            kind => {
                self.overrides.insert(type_name, kind);
            }
        }
        self
    }

    pub fn unregister(&mut self, type_name: &str) -> Option<Kind> {
        self.overrides.remove(type_name)
    }

    /// Kind of a record type by name.
    pub fn kind_of_type(&self, type_name: &str) -> Kind {
        self.overrides
            .get(type_name)
            .copied()
            .unwrap_or(Kind::Object)
    }

    pub fn kind_of(&self, value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => Kind::Primitive,
            Value::Object(_) => Kind::Data,
            Value::List(_) => Kind::List,
            Value::Record(r) => self.kind_of_type(&r.type_name()),
        }
    }

    /// Like [`crate::wrap`], honoring the overrides.
    pub fn wrap(&self, value: impl Into<Value>) -> Dot {
        let value = value.into();
        match self.kind_of(&value) {
            Kind::Null => Dot::Null(Null::new()),
            Kind::Primitive => Dot::Value(value),
            Kind::Data => Dot::Data(Data::from_value(value)),
            Kind::List | Kind::Object => wrap(value),
        }
    }
}
