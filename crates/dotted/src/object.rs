//! Application records seen as mappings.
//!
//! A type opts in by implementing [`Fields`]; [`Record`] is the shared handle
//! the value model stores, and [`DataObject`] is the view returned when a
//! record is read through a path.

use crate::access::{get_steps, read_steps, set_steps, write_steps};
use crate::data::Data;
use crate::dot::{wrap, Dot};
use crate::error::DotsError;
use crate::value::{write_value, Object, Value};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Field access for a structured application type.
///
/// # Example
///
/// ```
/// use dotted::{DotsError, Fields, Record, Value};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Fields for Point {
///     fn type_name(&self) -> &str {
///         "Point"
///     }
///
///     fn fields(&self) -> Vec<String> {
///         vec!["x".to_string(), "y".to_string()]
///     }
///
///     fn get_field(&self, name: &str) -> Option<Value> {
///         match name {
///             "x" => Some(Value::Int(self.x)),
///             "y" => Some(Value::Int(self.y)),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: Value) -> Result<(), DotsError> {
///         let slot = match name {
///             "x" => &mut self.x,
///             "y" => &mut self.y,
///             _ => {
///                 return Err(DotsError::NoField {
///                     type_name: "Point".to_string(),
///                     field: name.to_string(),
///                 })
///             }
///         };
///         *slot = value.as_i64().unwrap_or_default();
///         Ok(())
///     }
/// }
///
/// let record = Record::new(Point { x: 1, y: 2 });
/// assert_eq!(record.get_field("y"), Some(Value::Int(2)));
/// ```
pub trait Fields {
    fn type_name(&self) -> &str;

    /// Field names, in declaration order.
    fn fields(&self) -> Vec<String>;

    fn get_field(&self, name: &str) -> Option<Value>;

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), DotsError>;
}

/// Shared handle to a [`Fields`] implementor.
#[derive(Clone)]
pub struct Record(Rc<RefCell<dyn Fields>>);

impl Record {
    pub fn new<T: Fields + 'static>(fields: T) -> Self {
        Record(Rc::new(RefCell::new(fields)))
    }

    /// Wrap a record the caller keeps its own handle to.
    pub fn from_shared<T: Fields + 'static>(shared: Rc<RefCell<T>>) -> Self {
        Record(shared)
    }

    pub fn type_name(&self) -> String {
        self.0.borrow().type_name().to_string()
    }

    pub fn fields(&self) -> Vec<String> {
        self.0.borrow().fields()
    }

    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.0.borrow().get_field(name)
    }

    pub fn set_field(&self, name: &str, value: Value) -> Result<(), DotsError> {
        self.0.borrow_mut().set_field(name, value)
    }

    /// Fields holding a non-null value, in declaration order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        let inner = self.0.borrow();
        inner
            .fields()
            .into_iter()
            .filter_map(|name| {
                let value = inner.get_field(&name)?;
                (!value.is_null()).then_some((name, value))
            })
            .collect()
    }

    pub fn ptr_eq(&self, other: &Record) -> bool {
        self.id() == other.id()
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, &Value::Record(self.clone()), &mut Vec::new())
    }
}

/// Mapping view over a [`Record`].
///
/// Reads and writes use the same path rules as [`Data`]; a field name that
/// does not match exactly falls back to a case-insensitive match.
#[derive(Clone)]
pub struct DataObject {
    record: Record,
}

impl DataObject {
    pub fn new(record: Record) -> Self {
        DataObject { record }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn to_value(&self) -> Value {
        Value::Record(self.record.clone())
    }

    pub fn get(&self, path: &str) -> Dot {
        if dotted_path::is_self(path) {
            return Dot::Object(self.clone());
        }
        get_steps(&self.to_value(), &read_steps(path))
    }

    /// Write through the record. A path the record can not hold is logged and
    /// skipped; an ambiguous field name is an error.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<(), DotsError> {
        let steps = write_steps(path);
        match set_steps(&self.to_value(), &steps, value.into()) {
            Err(DotsError::PathNotFound { path: missing })
            | Err(DotsError::NoField { field: missing, .. }) => {
                tracing::warn!(
                    path,
                    missing = %missing,
                    "Path not found on {}",
                    self.record.type_name()
                );
                Ok(())
            }
            other => other,
        }
    }

    pub fn delete(&self, path: &str) -> Result<(), DotsError> {
        self.set(path, Value::Null)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_present()
    }

    pub fn keys(&self) -> Vec<String> {
        self.record.entries().into_iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<Dot> {
        self.record
            .entries()
            .into_iter()
            .map(|(_, v)| wrap(v))
            .collect()
    }

    pub fn items(&self) -> Vec<(String, Dot)> {
        self.record
            .entries()
            .into_iter()
            .map(|(k, v)| (k, wrap(v)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.record.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_present(&self) -> bool {
        true
    }

    pub fn is_non_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_truthy(&self) -> bool {
        true
    }

    /// Snapshot of the record's fields as plain data.
    pub fn to_data(&self) -> Data {
        let object = Object::new();
        for (k, v) in self.record.entries() {
            object.insert(k, v);
        }
        Data::from(object)
    }
}

impl PartialEq for DataObject {
    fn eq(&self, other: &DataObject) -> bool {
        self.to_value() == other.to_value()
    }
}

impl PartialEq<Value> for DataObject {
    fn eq(&self, other: &Value) -> bool {
        &self.to_value() == other
    }
}

impl Hash for DataObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_value().hash(state);
    }
}

impl fmt::Debug for DataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataObject({:?})", self.record)
    }
}

impl fmt::Display for DataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}
