//! Sequence view with flat slices and projection.
//!
//! Slices are "flat": bounds are clamped into range instead of failing, as if
//! the list continued with nulls on both sides. Reading a key projects it
//! over the elements.

use crate::access::{get_steps, read_steps, set_steps, write_steps};
use crate::dot::{wrap, Dot};
use crate::error::DotsError;
use crate::null::Null;
use crate::value::{List, Value};
use dotted_path::is_self;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitOr};

/// A view over one backing list (same handle, no copy).
///
/// # Example
///
/// ```
/// use dotted::FlatList;
/// use serde_json::json;
///
/// let list = FlatList::from(vec![1, 2, 3]);
/// assert_eq!(list.right(Some(2)), json!([2, 3]));
/// assert_eq!(list.slice(Some(-5), Some(2), None).unwrap(), json!([1, 2]));
/// assert!(list.index(7).is_null());
/// ```
#[derive(Clone)]
pub struct FlatList {
    list: List,
}

impl Default for FlatList {
    fn default() -> Self {
        FlatList::new()
    }
}

impl FlatList {
    pub fn new() -> Self {
        FlatList { list: List::new() }
    }

    pub fn from_vec(values: Vec<Value>) -> Self {
        FlatList {
            list: List::from_vec(values),
        }
    }

    /// The backing list, same handle.
    pub fn to_list(&self) -> List {
        self.list.clone()
    }

    pub fn to_value(&self) -> Value {
        Value::List(self.list.clone())
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Wrapped elements, snapshot of the current contents.
    pub fn iter(&self) -> impl Iterator<Item = Dot> {
        self.list.to_vec().into_iter().map(wrap)
    }

    /// Element at `index`. A negative or out-of-range index gives [`Null`];
    /// past the end, that null writes back into the list.
    pub fn index(&self, index: i64) -> Dot {
        if index < 0 {
            return Dot::Null(Null::new());
        }
        match self.list.get(index as usize) {
            Some(v) if !v.is_null() => wrap(v),
            _ => Dot::Null(Null::at(self.to_value(), index.to_string())),
        }
    }

    /// Store `value` at `index`, padding any gap with nulls.
    pub fn set_index(&self, index: usize, value: impl Into<Value>) {
        self.list.set(index, value.into());
    }

    /// `list[start:stop]` with both bounds clamped to `0..=len`.
    ///
    /// # Errors
    ///
    /// [`DotsError::SliceStep`] for any step.
    pub fn slice(
        &self,
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    ) -> Result<FlatList, DotsError> {
        if let Some(step) = step {
            return Err(DotsError::SliceStep { step });
        }
        let len = self.len() as i64;
        let i = start.map_or(0, |s| s.clamp(0, len)) as usize;
        let j = stop.map_or(len, |s| s.clamp(0, len)) as usize;
        Ok(self.range(i, j))
    }

    fn range(&self, i: usize, j: usize) -> FlatList {
        let items = self.list.borrow();
        if i >= j {
            return FlatList::new();
        }
        FlatList::from_vec(items[i..j].to_vec())
    }

    /// Project `path` over every element. List results are flattened one
    /// level; absent results are dropped.
    pub fn get(&self, path: &str) -> Dot {
        if is_self(path) {
            return Dot::List(self.clone());
        }
        self.get_steps(&read_steps(path))
    }

    pub(crate) fn get_steps(&self, steps: &[String]) -> Dot {
        if steps.is_empty() {
            return Dot::List(self.clone());
        }
        let mut out = Vec::new();
        for element in self.list.to_vec() {
            match get_steps(&element, steps) {
                Dot::Null(_) => {}
                Dot::List(inner) => out.extend(inner.list.to_vec()),
                found => out.push(found.into_value()),
            }
        }
        Dot::List(FlatList::from_vec(out))
    }

    /// Broadcast the write to every element. An integer path writes the
    /// element at that index instead.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<(), DotsError> {
        let steps = write_steps(path);
        set_steps(&self.to_value(), &steps, value.into())
    }

    pub fn delete(&self, path: &str) -> Result<(), DotsError> {
        self.set(path, Value::Null)
    }

    /// New list of the elements `keep` accepts.
    pub fn filter(&self, keep: impl Fn(&Dot) -> bool) -> FlatList {
        let kept = self
            .list
            .to_vec()
            .into_iter()
            .filter(|v| keep(&wrap(v.clone())))
            .collect();
        FlatList::from_vec(kept)
    }

    /// New list of `f` applied to each element; with `include_none` unset,
    /// null elements are skipped.
    pub fn map<T: Into<Value>>(&self, f: impl Fn(Dot) -> T, include_none: bool) -> FlatList {
        let mapped = self
            .list
            .to_vec()
            .into_iter()
            .filter(|v| include_none || !v.is_null())
            .map(|v| f(wrap(v)).into())
            .collect();
        FlatList::from_vec(mapped)
    }

    pub fn append(&self, value: impl Into<Value>) {
        self.list.push(value.into());
    }

    pub fn extend<I, T>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut items = self.list.borrow_mut();
        items.extend(values.into_iter().map(Into::into));
    }

    /// Remove the first element equal to `value`. Returns whether one was found.
    pub fn remove(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        // compare on a snapshot; an element may be this list itself
        match self.list.to_vec().iter().position(|v| v == &value) {
            Some(i) => {
                self.list.borrow_mut().remove(i);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&self, index: usize) -> Dot {
        let mut items = self.list.borrow_mut();
        if index >= items.len() {
            return Dot::Null(Null::new());
        }
        wrap(items.remove(index))
    }

    /// Remove `start..stop`, clamped like [`FlatList::slice`].
    pub fn remove_range(&self, start: usize, stop: usize) {
        let mut items = self.list.borrow_mut();
        let len = items.len();
        let (i, j) = (start.min(len), stop.min(len));
        if i < j {
            items.drain(i..j);
        }
    }

    /// Remove and return the element at `index` (the last when `None`;
    /// negative counts from the end).
    pub fn pop(&self, index: Option<i64>) -> Dot {
        let len = self.len() as i64;
        let i = match index {
            None => len - 1,
            Some(i) if i < 0 => len + i,
            Some(i) => i,
        };
        if i < 0 || i >= len {
            return Dot::Null(Null::new());
        }
        self.remove_at(i as usize)
    }

    /// Point this view at a new empty list. The old backing list is untouched.
    pub fn clear(&mut self) {
        self.list = List::new();
    }

    pub fn contains(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.list.borrow().iter().any(|v| v == &value)
    }

    pub fn copy(&self) -> FlatList {
        FlatList::from_vec(self.list.to_vec())
    }

    pub fn deep_copy(&self) -> FlatList {
        match self.to_value().deep_copy() {
            Value::List(list) => FlatList { list },
            _ => FlatList::new(),
        }
    }

    pub fn last(&self) -> Dot {
        match self.list.borrow().last() {
            Some(v) => wrap(v.clone()),
            None => Dot::Null(Null::new()),
        }
    }

    /// The last `num` elements. `None` is the whole list; a non-positive
    /// `num` is empty.
    pub fn right(&self, num: Option<i64>) -> FlatList {
        match num {
            None => self.clone(),
            Some(n) if n <= 0 => FlatList::new(),
            Some(n) => {
                let len = self.len();
                self.range(len.saturating_sub(n as usize), len)
            }
        }
    }

    /// The first `num` elements. `None` is the whole list; a non-positive
    /// `num` is empty.
    pub fn left(&self, num: Option<i64>) -> FlatList {
        match num {
            None => self.clone(),
            Some(n) if n <= 0 => FlatList::new(),
            Some(n) => self.range(0, (n as usize).min(self.len())),
        }
    }

    pub fn limit(&self, num: Option<i64>) -> FlatList {
        self.left(num)
    }

    /// All but the last `num` elements. `None` or zero is the whole list; a
    /// negative `num` is empty.
    pub fn not_right(&self, num: Option<i64>) -> FlatList {
        match num {
            None | Some(0) => self.clone(),
            Some(n) if n < 0 => FlatList::new(),
            Some(n) => self.range(0, self.len().saturating_sub(n as usize)),
        }
    }

    /// All but the first `num` elements. `None` or a non-positive `num` is the
    /// whole list.
    pub fn not_left(&self, num: Option<i64>) -> FlatList {
        match num {
            Some(n) if n > 0 => self.range((n as usize).min(self.len()), self.len()),
            _ => self.clone(),
        }
    }

    /// `self + other`: a new list, `other` appended (or its elements, when it
    /// is a list). Adding null returns this view unchanged.
    pub fn add(&self, other: impl Into<Value>) -> FlatList {
        let other = other.into();
        if other.is_null() {
            return self.clone();
        }
        let mut out = self.list.to_vec();
        match other {
            Value::List(l) => out.extend(l.to_vec()),
            scalar => out.push(scalar),
        }
        FlatList::from_vec(out)
    }

    /// `other + self`.
    pub fn radd(&self, other: impl Into<Value>) -> FlatList {
        let other = other.into();
        if other.is_null() {
            return self.clone();
        }
        let mut out = match other {
            Value::List(l) => l.to_vec(),
            scalar => vec![scalar],
        };
        out.extend(self.list.to_vec());
        FlatList::from_vec(out)
    }

    /// `self += other`, in place.
    pub fn add_assign(&self, other: impl Into<Value>) {
        match other.into() {
            Value::Null => {}
            Value::List(l) => {
                let incoming = l.to_vec();
                self.extend(incoming);
            }
            scalar => self.append(scalar),
        }
    }

    pub fn is_present(&self) -> bool {
        true
    }

    pub fn is_non_empty(&self) -> bool {
        !self.is_empty()
    }

    /// An empty list is falsy, unlike an empty [`crate::Data`].
    pub fn is_truthy(&self) -> bool {
        !self.is_empty()
    }

    /// An empty list equals null; a non-empty one is unknown against null.
    pub fn loose_eq(&self, other: &Dot) -> Option<bool> {
        match other {
            Dot::Null(_) | Dot::Value(Value::Null) => self.is_empty().then_some(true),
            other => Some(self.to_value() == other.to_value()),
        }
    }
}

impl From<List> for FlatList {
    fn from(list: List) -> Self {
        FlatList { list }
    }
}

impl<T: Into<Value>> From<Vec<T>> for FlatList {
    fn from(values: Vec<T>) -> Self {
        FlatList::from_vec(values.into_iter().map(Into::into).collect())
    }
}

impl PartialEq for FlatList {
    fn eq(&self, other: &FlatList) -> bool {
        self.to_value() == other.to_value()
    }
}

impl PartialEq<Value> for FlatList {
    fn eq(&self, other: &Value) -> bool {
        &self.to_value() == other
    }
}

impl PartialEq<Dot> for FlatList {
    fn eq(&self, other: &Dot) -> bool {
        self.loose_eq(other) == Some(true)
    }
}

/// Hash of the first element only; every empty list hashes like null.
impl Hash for FlatList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.list.get(0) {
            Some(first) => wrap(first).hash(state),
            None => Value::Null.hash(state),
        }
    }
}

impl fmt::Debug for FlatList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlatList({:?})", self.to_value())
    }
}

impl fmt::Display for FlatList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl<T: Into<Value>> Add<T> for &FlatList {
    type Output = FlatList;

    fn add(self, rhs: T) -> FlatList {
        FlatList::add(self, rhs)
    }
}

impl<T: Into<Value>> BitOr<T> for &FlatList {
    type Output = FlatList;

    fn bitor(self, rhs: T) -> FlatList {
        FlatList::add(self, rhs)
    }
}
