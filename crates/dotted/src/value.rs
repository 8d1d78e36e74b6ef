//! The native value model the views wrap.
//!
//! [`Object`] and [`List`] are shared handles: cloning a [`Value`] that holds
//! one clones the handle, so two clones see each other's writes. This is what
//! lets a view write through to the structure it was read from.

use crate::object::Record;
use indexmap::IndexMap;
use std::cell::{Ref, RefCell, RefMut};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Ordered mapping storage behind an [`Object`].
pub type Map = IndexMap<String, Value>;

/// Shared, mutable, insertion-ordered mapping.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<Map>>);

impl Object {
    pub fn new() -> Self {
        Object::default()
    }

    pub fn from_map(map: Map) -> Self {
        Object(Rc::new(RefCell::new(map)))
    }

    pub fn borrow(&self) -> Ref<'_, Map> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Map> {
        self.0.borrow_mut()
    }

    /// Value stored under `key`, including an explicit null.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    /// Remove `key`, keeping the order of the remaining keys.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Snapshot of the entries, so callers can recurse without holding a borrow.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object(")?;
        write_value(f, &Value::Object(self.clone()), &mut Vec::new())?;
        write!(f, ")")
    }
}

/// Shared, mutable list.
#[derive(Clone, Default)]
pub struct List(Rc<RefCell<Vec<Value>>>);

impl List {
    pub fn new() -> Self {
        List::default()
    }

    pub fn from_vec(values: Vec<Value>) -> Self {
        List(Rc::new(RefCell::new(values)))
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Snapshot of the elements, so callers can recurse without holding a borrow.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Store `value` at `index`, padding any gap with nulls.
    pub fn set(&self, index: usize, value: Value) {
        let mut list = self.0.borrow_mut();
        if index >= list.len() {
            list.resize(index + 1, Value::Null);
        }
        list[index] = value;
    }

    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List(")?;
        write_value(f, &Value::List(self.clone()), &mut Vec::new())?;
        write!(f, ")")
    }
}

/// A native value: a primitive, a shared container, or an application record.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Object(Object),
    List(List),
    Record(Record),
}

impl Value {
    /// Name of the value's kind, used in error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::Object(_) => "object".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Record(r) => r.type_name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Objects and records: anything addressed by field name.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Record(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_container(&self) -> bool {
        self.is_mapping() || self.is_list()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Entries of a mapping, skipping nulls. `None` for non-mappings.
    pub fn mapping_entries(&self) -> Option<Vec<(String, Value)>> {
        match self {
            Value::Object(o) => Some(
                o.entries()
                    .into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .collect(),
            ),
            Value::Record(r) => Some(r.entries()),
            _ => None,
        }
    }

    /// Identity of a shared container, `None` for everything else.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Value::Object(o) => Some(o.id()),
            Value::List(l) => Some(l.id()),
            Value::Record(r) => Some(r.id()),
            _ => None,
        }
    }

    /// Same shared container, or equal primitives.
    pub fn same(&self, other: &Value) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self == other,
            _ => false,
        }
    }

    /// Copy every reachable container. Sub-structures shared inside `self`
    /// stay shared inside the copy, and cycles are reproduced.
    pub fn deep_copy(&self) -> Value {
        self.deep_copy_with(&mut HashMap::new())
    }

    pub(crate) fn deep_copy_with(&self, memo: &mut HashMap<usize, Value>) -> Value {
        match self {
            Value::Object(o) => {
                if let Some(done) = memo.get(&o.id()) {
                    return done.clone();
                }
                let copy = Object::new();
                memo.insert(o.id(), Value::Object(copy.clone()));
                for (k, v) in o.entries() {
                    let v = v.deep_copy_with(memo);
                    copy.insert(k, v);
                }
                Value::Object(copy)
            }
            Value::List(l) => {
                if let Some(done) = memo.get(&l.id()) {
                    return done.clone();
                }
                let copy = List::new();
                memo.insert(l.id(), Value::List(copy.clone()));
                for v in l.to_vec() {
                    let v = v.deep_copy_with(memo);
                    copy.push(v);
                }
                Value::List(copy)
            }
            Value::Record(r) => {
                if let Some(done) = memo.get(&r.id()) {
                    return done.clone();
                }
                let copy = Object::new();
                memo.insert(r.id(), Value::Object(copy.clone()));
                for (k, v) in r.entries() {
                    let v = v.deep_copy_with(memo);
                    copy.insert(k, v);
                }
                Value::Object(copy)
            }
            other => other.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        match i64::try_from(n) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(n as f64),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Object(Object::from_map(m))
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(List::from_vec(values.into_iter().map(Into::into).collect()))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        eq_with(self, other, &mut Vec::new())
    }
}

/// The integer a float holds exactly, if any. `i64::MAX as f64` rounds up to
/// 2^63, which is out of range.
fn float_as_int(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Orders an integer against a float without rounding the integer, so it
/// agrees with equality above 2^53.
fn cmp_int_float(x: i64, y: f64) -> Option<Ordering> {
    match float_as_int(y) {
        Some(i) => Some(x.cmp(&i)),
        // only 2^63 and above round an i64 up to equality
        None => match (x as f64).partial_cmp(&y)? {
            Ordering::Equal => Some(Ordering::Less),
            unequal => Some(unequal),
        },
    }
}

/// Structural equality. `seen` holds the container pairs under comparison, so a
/// cycle compares equal to itself instead of recursing forever.
fn eq_with(a: &Value, b: &Value, seen: &mut Vec<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => {
            float_as_int(*y) == Some(*x)
        }
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let pair = (x.id(), y.id());
            if seen.contains(&pair) {
                return true;
            }
            let (xs, ys) = (x.to_vec(), y.to_vec());
            if xs.len() != ys.len() {
                return false;
            }
            seen.push(pair);
            let equal = xs.iter().zip(ys.iter()).all(|(u, v)| eq_with(u, v, seen));
            seen.pop();
            equal
        }
        _ if a.is_mapping() && b.is_mapping() => {
            let (Some(x), Some(y)) = (a.identity(), b.identity()) else {
                return false;
            };
            if x == y || seen.contains(&(x, y)) {
                return true;
            }
            let (Some(xs), Some(ys)) = (a.mapping_entries(), b.mapping_entries()) else {
                return false;
            };
            if xs.len() != ys.len() {
                return false;
            }
            seen.push((x, y));
            let equal = xs.iter().all(|(k, u)| {
                ys.iter()
                    .find(|(key, _)| key == k)
                    .is_some_and(|(_, v)| eq_with(u, v, seen))
            });
            seen.pop();
            equal
        }
        _ => false,
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Value::Int(i) => {
                state.write_u8(2);
                i.hash(state);
            }
            Value::Float(f) => {
                if let Some(i) = float_as_int(*f) {
                    state.write_u8(2);
                    i.hash(state);
                } else {
                    state.write_u8(3);
                    f.to_bits().hash(state);
                }
            }
            Value::Str(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            Value::Object(_) | Value::Record(_) => {
                state.write_u8(5);
                let mut keys: Vec<String> = self
                    .mapping_entries()
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(k, _)| k)
                    .collect();
                keys.sort();
                keys.hash(state);
            }
            Value::List(l) => {
                state.write_u8(6);
                l.len().hash(state);
            }
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Bool(x), Value::Bool(y)) => x.partial_cmp(y),
            (Value::Int(x), Value::Int(y)) => x.partial_cmp(y),
            (Value::Str(x), Value::Str(y)) => x.partial_cmp(y),
            (Value::Int(x), Value::Float(y)) => cmp_int_float(*x, *y),
            (Value::Float(x), Value::Int(y)) => cmp_int_float(*y, *x).map(Ordering::reverse),
            (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
            (Value::List(x), Value::List(y)) => {
                if x.ptr_eq(y) {
                    return Some(Ordering::Equal);
                }
                let (xs, ys) = (x.to_vec(), y.to_vec());
                for (u, v) in xs.iter().zip(ys.iter()) {
                    match u.partial_cmp(v)? {
                        Ordering::Equal => continue,
                        unequal => return Some(unequal),
                    }
                }
                xs.len().partial_cmp(&ys.len())
            }
            (x, y) if x == y => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

/// JSON-like rendering. Containers already on `stack` print as `{...}`/`[...]`.
pub(crate) fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    stack: &mut Vec<usize>,
) -> fmt::Result {
    match value {
        Value::Null => write!(f, "null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Int(i) => write!(f, "{i}"),
        Value::Float(x) => write!(f, "{x:?}"),
        Value::Str(s) => write!(f, "{s:?}"),
        Value::List(l) => {
            if stack.contains(&l.id()) {
                return write!(f, "[...]");
            }
            stack.push(l.id());
            write!(f, "[")?;
            for (i, v) in l.to_vec().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_value(f, v, stack)?;
            }
            stack.pop();
            write!(f, "]")
        }
        Value::Object(_) | Value::Record(_) => {
            let id = value.identity().unwrap_or_default();
            if stack.contains(&id) {
                return write!(f, "{{...}}");
            }
            if let Value::Record(r) = value {
                write!(f, "{} ", r.type_name())?;
            }
            stack.push(id);
            write!(f, "{{")?;
            let entries = value.mapping_entries().unwrap_or_default();
            for (i, (k, v)) in entries.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k:?}: ")?;
                write_value(f, v, stack)?;
            }
            stack.pop();
            write!(f, "}}")
        }
    }
}
