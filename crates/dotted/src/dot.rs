//! The wrapped result of every read.

use crate::access::{get_steps, read_steps, set_steps, write_steps};
use crate::data::Data;
use crate::error::DotsError;
use crate::list::FlatList;
use crate::merge::add_leaf;
use crate::null::Null;
use crate::object::DataObject;
use crate::value::Value;
use dotted_path::is_self;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value seen through the view matching its kind.
///
/// Mappings become [`Data`], lists [`FlatList`], records [`DataObject`],
/// absence [`Null`]; primitives pass through as [`Value`].
#[derive(Clone)]
pub enum Dot {
    Null(Null),
    Data(Data),
    List(FlatList),
    Object(DataObject),
    Value(Value),
}

/// Wrap a native value in its view. No copy is made.
///
/// # Example
///
/// ```
/// use dotted::{unwrap, wrap, Dot, Value};
/// use serde_json::json;
///
/// let native = Value::from(json!({"a": 1}));
/// let dot = wrap(native.clone());
/// assert!(matches!(dot, Dot::Data(_)));
/// assert!(unwrap(dot).same(&native));
/// ```
pub fn wrap(value: impl Into<Value>) -> Dot {
    match value.into() {
        Value::Null => Dot::Null(Null::new()),
        object @ Value::Object(_) => Dot::Data(Data::from_value(object)),
        Value::List(list) => Dot::List(FlatList::from(list)),
        Value::Record(record) => Dot::Object(DataObject::new(record)),
        primitive => Dot::Value(primitive),
    }
}

/// The native value behind a view, same handle.
pub fn unwrap(dot: Dot) -> Value {
    dot.into_value()
}

#[derive(Clone, Copy)]
enum Arith {
    Sub,
    Mul,
    Div,
}

impl Arith {
    fn name(self) -> &'static str {
        match self {
            Arith::Sub => "subtract",
            Arith::Mul => "multiply",
            Arith::Div => "divide",
        }
    }

    fn apply(self, left: &Value, right: &Value) -> Result<Value, DotsError> {
        if !(left.is_number() && right.is_number()) {
            return Err(DotsError::op_mismatch(self.name(), left, right));
        }
        let (x, y) = (
            left.as_f64().unwrap_or_default(),
            right.as_f64().unwrap_or_default(),
        );
        let exact = match (self, left, right) {
            (Arith::Sub, Value::Int(a), Value::Int(b)) => a.checked_sub(*b),
            (Arith::Mul, Value::Int(a), Value::Int(b)) => a.checked_mul(*b),
            _ => None,
        };
        Ok(match (self, exact) {
            (_, Some(n)) => Value::Int(n),
            (Arith::Sub, None) => Value::Float(x - y),
            (Arith::Mul, None) => Value::Float(x * y),
            (Arith::Div, _) if y == 0.0 => return Err(DotsError::DivisionByZero),
            (Arith::Div, _) => Value::Float(x / y),
        })
    }
}

impl Dot {
    pub fn get(&self, path: &str) -> Dot {
        match self {
            Dot::Null(n) => n.get(path),
            Dot::Data(d) => d.get(path),
            Dot::List(l) => l.get(path),
            Dot::Object(o) => o.get(path),
            Dot::Value(v) => {
                if is_self(path) {
                    self.clone()
                } else {
                    get_steps(v, &read_steps(path))
                }
            }
        }
    }

    /// Write through the view. Writing `"."` replaces what this `Dot` holds
    /// (for [`Null`], it writes where the null was read from).
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), DotsError> {
        let value = value.into();
        match self {
            Dot::Null(n) => return n.set(path, value),
            Dot::Data(d) => return d.set(path, value),
            _ if is_self(path) => {
                *self = wrap(value);
                Ok(())
            }
            Dot::List(l) => l.set(path, value),
            Dot::Object(o) => o.set(path, value),
            Dot::Value(v) => set_steps(v, &write_steps(path), value),
        }
    }

    pub fn delete(&mut self, path: &str) -> Result<(), DotsError> {
        self.set(path, Value::Null)
    }

    /// Anything but [`Null`] is present.
    pub fn is_present(&self) -> bool {
        !self.is_null()
    }

    pub fn is_non_empty(&self) -> bool {
        match self {
            Dot::Null(_) => false,
            Dot::Data(d) => d.is_non_empty(),
            Dot::List(l) => l.is_non_empty(),
            Dot::Object(o) => o.is_non_empty(),
            Dot::Value(Value::Str(s)) => !s.is_empty(),
            Dot::Value(_) => true,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Dot::Null(_) => false,
            Dot::Data(d) => d.is_truthy(),
            Dot::List(l) => l.is_truthy(),
            Dot::Object(o) => o.is_truthy(),
            Dot::Value(v) => match v {
                Value::Bool(b) => *b,
                Value::Int(i) => *i != 0,
                Value::Float(f) => *f != 0.0,
                Value::Str(s) => !s.is_empty(),
                _ => true,
            },
        }
    }

    /// Number of entries or elements; characters for a string; zero for other
    /// primitives.
    pub fn len(&self) -> usize {
        match self {
            Dot::Null(_) => 0,
            Dot::Data(d) => d.len(),
            Dot::List(l) => l.len(),
            Dot::Object(o) => o.len(),
            Dot::Value(Value::Str(s)) => s.chars().count(),
            Dot::Value(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.is_non_empty()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dot::Null(_))
    }

    pub fn as_null(&self) -> Option<&Null> {
        match self {
            Dot::Null(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Data> {
        match self {
            Dot::Data(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&FlatList> {
        match self {
            Dot::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DataObject> {
        match self {
            Dot::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The native value, same handle. [`Null`] becomes [`Value::Null`].
    pub fn to_value(&self) -> Value {
        match self {
            Dot::Null(_) => Value::Null,
            Dot::Data(d) => d.to_value(),
            Dot::List(l) => l.to_value(),
            Dot::Object(o) => o.to_value(),
            Dot::Value(v) => v.clone(),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Dot::Data(d) => d.into_value(),
            Dot::Value(v) => v,
            other => other.to_value(),
        }
    }

    /// Tri-state equality: `None` when one side is [`Null`] and the other is
    /// something it can not be compared with.
    pub fn loose_eq(&self, other: &Dot) -> Option<bool> {
        match (self, other) {
            (Dot::Null(n), _) => n.loose_eq(other),
            (Dot::Data(d), _) => d.loose_eq(other),
            (Dot::List(l), _) => l.loose_eq(other),
            (_, Dot::Null(n)) => n.loose_eq(self),
            _ => Some(self.to_value() == other.to_value()),
        }
    }

    /// `self + other`. Anything plus null is null, except that a list and
    /// null added either way round give the list.
    ///
    /// # Errors
    ///
    /// [`DotsError::AddMismatch`] when the kinds can not be added.
    pub fn add(&self, other: impl Into<Value>) -> Result<Dot, DotsError> {
        let other = other.into();
        match self {
            Dot::Null(n) => Ok(n.clone() + other),
            Dot::List(l) => Ok(Dot::List(l.add(other))),
            _ if other.is_null() => Ok(Dot::Null(Null::new())),
            Dot::Data(d) => Ok(wrap(d.add(other)?.into_value())),
            Dot::Object(o) => Ok(wrap(o.to_data().add(other)?.into_value())),
            Dot::Value(v) => Ok(wrap(add_leaf(v, &other)?)),
        }
    }

    pub fn sub(&self, other: impl Into<Value>) -> Result<Dot, DotsError> {
        self.arith(Arith::Sub, other.into())
    }

    pub fn mul(&self, other: impl Into<Value>) -> Result<Dot, DotsError> {
        self.arith(Arith::Mul, other.into())
    }

    /// Always a float.
    ///
    /// # Errors
    ///
    /// [`DotsError::DivisionByZero`] for a zero divisor.
    pub fn div(&self, other: impl Into<Value>) -> Result<Dot, DotsError> {
        self.arith(Arith::Div, other.into())
    }

    fn arith(&self, op: Arith, other: Value) -> Result<Dot, DotsError> {
        if self.is_null() || other.is_null() {
            return Ok(Dot::Null(Null::new()));
        }
        Ok(wrap(op.apply(&self.to_value(), &other)?))
    }
}

impl PartialEq for Dot {
    fn eq(&self, other: &Dot) -> bool {
        self.loose_eq(other) == Some(true)
    }
}

impl PartialEq<Value> for Dot {
    fn eq(&self, other: &Value) -> bool {
        self.loose_eq(&wrap(other.clone())) == Some(true)
    }
}

/// Nulls are equal to each other and unordered against everything else.
impl PartialOrd for Dot {
    fn partial_cmp(&self, other: &Dot) -> Option<Ordering> {
        match (self, other) {
            (Dot::Null(_), Dot::Null(_)) => Some(Ordering::Equal),
            (Dot::Null(_), _) | (_, Dot::Null(_)) => None,
            _ => self.to_value().partial_cmp(&other.to_value()),
        }
    }
}

impl Hash for Dot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Dot::Null(n) => n.hash(state),
            Dot::Data(d) => d.hash(state),
            Dot::List(l) => l.hash(state),
            Dot::Object(o) => o.hash(state),
            Dot::Value(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Dot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dot::Null(n) => fmt::Display::fmt(n, f),
            other => write!(f, "{}", other.to_value()),
        }
    }
}

impl fmt::Debug for Dot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dot::Null(n) => fmt::Debug::fmt(n, f),
            Dot::Data(d) => fmt::Debug::fmt(d, f),
            Dot::List(l) => fmt::Debug::fmt(l, f),
            Dot::Object(o) => fmt::Debug::fmt(o, f),
            Dot::Value(v) => fmt::Debug::fmt(v, f),
        }
    }
}

impl From<Value> for Dot {
    fn from(value: Value) -> Self {
        wrap(value)
    }
}

impl From<Data> for Dot {
    fn from(data: Data) -> Self {
        Dot::Data(data)
    }
}

impl From<FlatList> for Dot {
    fn from(list: FlatList) -> Self {
        Dot::List(list)
    }
}

impl From<Null> for Dot {
    fn from(null: Null) -> Self {
        Dot::Null(null)
    }
}

impl From<Dot> for Value {
    fn from(dot: Dot) -> Self {
        dot.into_value()
    }
}

impl From<Data> for Value {
    fn from(data: Data) -> Self {
        data.into_value()
    }
}

impl From<FlatList> for Value {
    fn from(list: FlatList) -> Self {
        list.to_value()
    }
}

impl From<Null> for Value {
    fn from(_: Null) -> Self {
        Value::Null
    }
}

impl From<DataObject> for Value {
    fn from(object: DataObject) -> Self {
        object.to_value()
    }
}
