//! The absence sentinel.
//!
//! Every read that finds nothing returns a [`Null`]. It is falsy, empty and
//! closed under the arithmetic and bitwise operators, so chains like
//! `data.get("a.b") + 1` never fail. A `Null` also remembers the container
//! and key it was read from, so writing through it creates the missing
//! mappings in the original structure.

use crate::access::{read_key, read_steps, set_steps, write_key, write_steps};
use crate::dot::{wrap, Dot};
use crate::error::DotsError;
use crate::value::{Object, Value};
use dotted_path::join_field;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Sub};
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct Null {
    origin: Option<Rc<Origin>>,
}

struct Origin {
    parent: Parent,
    key: String,
}

enum Parent {
    Value(Value),
    Null(Null),
}

impl Null {
    /// A detached null with no origin. Writes through it are dropped.
    pub fn new() -> Self {
        Null::default()
    }

    /// The null found at `key` of an existing `parent`.
    pub(crate) fn at(parent: Value, key: String) -> Self {
        Null {
            origin: Some(Rc::new(Origin {
                parent: Parent::Value(parent),
                key,
            })),
        }
    }

    fn child(&self, key: String) -> Self {
        Null {
            origin: Some(Rc::new(Origin {
                parent: Parent::Null(self.clone()),
                key,
            })),
        }
    }

    pub(crate) fn get_steps(&self, steps: &[String]) -> Null {
        steps
            .iter()
            .fold(self.clone(), |null, step| null.child(step.clone()))
    }

    /// The key this null was read from.
    pub fn key(&self) -> Option<&str> {
        self.origin.as_ref().map(|o| o.key.as_str())
    }

    /// Path from the nearest existing container down to this null.
    pub fn path(&self) -> String {
        let mut keys = Vec::new();
        let mut current = self.origin.clone();
        while let Some(origin) = current {
            keys.push(origin.key.clone());
            current = match &origin.parent {
                Parent::Null(n) => n.origin.clone(),
                Parent::Value(_) => None,
            };
        }
        keys.reverse();
        join_field(keys.as_slice())
    }

    /// Whether a write through this null can reach an existing container.
    pub fn is_attached(&self) -> bool {
        match &self.origin {
            None => false,
            Some(origin) => match &origin.parent {
                Parent::Value(_) => true,
                Parent::Null(n) => n.is_attached(),
            },
        }
    }

    pub fn get(&self, path: &str) -> Dot {
        Dot::Null(self.get_steps(&read_steps(path)))
    }

    /// Write `value` at `path` below this null, creating every missing
    /// mapping between the nearest existing container and the target.
    ///
    /// Writing null is a no-op. On a detached null the write is logged and
    /// dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use dotted::Data;
    /// use serde_json::json;
    ///
    /// let data = Data::new();
    /// data.get("a.b").set("c", 1).unwrap();
    /// assert_eq!(data, json!({"a": {"b": {"c": 1}}}));
    /// ```
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<(), DotsError> {
        let value = value.into();
        if value.is_null() {
            return Ok(());
        }
        let steps = write_steps(path);
        if steps.is_empty() {
            return self.assign(value);
        }
        match self.materialize()? {
            Some(container) => set_steps(&container, &steps, value),
            None => {
                tracing::warn!(path, "Path not found: write through detached null dropped");
                Ok(())
            }
        }
    }

    /// Deleting below absence has nothing to remove.
    pub fn delete(&self, _path: &str) -> Result<(), DotsError> {
        Ok(())
    }

    /// Store `value` where this null was read from.
    pub fn assign(&self, value: impl Into<Value>) -> Result<(), DotsError> {
        let value = value.into();
        if value.is_null() {
            return Ok(());
        }
        let Some(origin) = &self.origin else {
            tracing::warn!("Path not found: assignment to detached null dropped");
            return Ok(());
        };
        let parent = match &origin.parent {
            Parent::Value(v) => v.clone(),
            Parent::Null(n) => match n.materialize()? {
                Some(v) => v,
                None => {
                    tracing::warn!(path = %self.path(), "Path not found: assignment dropped");
                    return Ok(());
                }
            },
        };
        write_key(&parent, &origin.key, value)
    }

    /// `x += value` where `x` is absent: the slot becomes `value`.
    pub fn iadd(&self, value: impl Into<Value>) -> Result<Dot, DotsError> {
        let value = value.into();
        if value.is_null() {
            return Ok(Dot::Null(self.clone()));
        }
        self.assign(value.clone())?;
        Ok(wrap(value))
    }

    /// Create the mapping this null stands for, and every missing one above
    /// it. `None` when the chain does not reach an existing container.
    fn materialize(&self) -> Result<Option<Value>, DotsError> {
        let Some(origin) = &self.origin else {
            return Ok(None);
        };
        let parent = match &origin.parent {
            Parent::Value(v) => v.clone(),
            Parent::Null(n) => match n.materialize()? {
                Some(v) => v,
                None => return Ok(None),
            },
        };
        if let Some(existing) = read_key(&parent, &origin.key) {
            if existing.is_container() {
                return Ok(Some(existing));
            }
        }
        let created = Value::Object(Object::new());
        write_key(&parent, &origin.key, created.clone())?;
        Ok(Some(created))
    }

    pub fn is_present(&self) -> bool {
        false
    }

    pub fn is_non_empty(&self) -> bool {
        false
    }

    pub fn is_truthy(&self) -> bool {
        false
    }

    pub fn len(&self) -> usize {
        0
    }

    pub fn is_empty(&self) -> bool {
        true
    }

    pub fn iter(&self) -> std::iter::Empty<Dot> {
        std::iter::empty()
    }

    /// Tri-state comparison: `Some(true)` against null, native null and empty
    /// lists, `None` ("unknown") against everything else.
    pub fn loose_eq(&self, other: &Dot) -> Option<bool> {
        match other {
            Dot::Null(_) | Dot::Value(Value::Null) => Some(true),
            Dot::List(l) if l.is_empty() => Some(true),
            Dot::Value(Value::List(l)) if l.is_empty() => Some(true),
            _ => None,
        }
    }
}

impl PartialEq for Null {
    fn eq(&self, _other: &Null) -> bool {
        true
    }
}

impl PartialEq<Dot> for Null {
    fn eq(&self, other: &Dot) -> bool {
        self.loose_eq(other) == Some(true)
    }
}

impl PartialEq<Value> for Null {
    fn eq(&self, other: &Value) -> bool {
        match other {
            Value::Null => true,
            Value::List(l) => l.is_empty(),
            _ => false,
        }
    }
}

impl Hash for Null {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Value::Null.hash(state);
    }
}

impl PartialOrd for Null {
    fn partial_cmp(&self, _other: &Null) -> Option<Ordering> {
        Some(Ordering::Equal)
    }
}

impl fmt::Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "None")
    }
}

impl fmt::Debug for Null {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            None => write!(f, "Null"),
            Some(_) => write!(f, "Null({})", self.path()),
        }
    }
}

impl<T: Into<Value>> Add<T> for Null {
    type Output = Dot;

    /// Adding a list yields the list; anything else stays null.
    fn add(self, rhs: T) -> Dot {
        let rhs = rhs.into();
        if rhs.is_list() {
            wrap(rhs)
        } else {
            Dot::Null(Null::new())
        }
    }
}

impl<T: Into<Value>> Sub<T> for Null {
    type Output = Dot;

    fn sub(self, _rhs: T) -> Dot {
        Dot::Null(Null::new())
    }
}

impl<T: Into<Value>> Mul<T> for Null {
    type Output = Dot;

    fn mul(self, _rhs: T) -> Dot {
        Dot::Null(Null::new())
    }
}

impl<T: Into<Value>> Div<T> for Null {
    type Output = Dot;

    fn div(self, _rhs: T) -> Dot {
        Dot::Null(Null::new())
    }
}

impl Neg for Null {
    type Output = Dot;

    fn neg(self) -> Dot {
        Dot::Null(Null::new())
    }
}

impl<T: Into<Value>> BitOr<T> for Null {
    type Output = Dot;

    /// `Null | x` is `x`.
    fn bitor(self, rhs: T) -> Dot {
        wrap(rhs.into())
    }
}

impl<T: Into<Value>> BitAnd<T> for Null {
    type Output = Dot;

    /// `Null & false` is `false`; anything else is null.
    fn bitand(self, rhs: T) -> Dot {
        match rhs.into() {
            Value::Bool(false) => Dot::Value(Value::Bool(false)),
            _ => Dot::Null(Null::new()),
        }
    }
}

impl<T: Into<Value>> BitXor<T> for Null {
    type Output = Dot;

    fn bitxor(self, _rhs: T) -> Dot {
        Dot::Null(Null::new())
    }
}

macro_rules! null_on_right {
    ($($t:ty),*) => {
        $(
            impl Add<Null> for $t {
                type Output = Dot;
                fn add(self, _rhs: Null) -> Dot {
                    Dot::Null(Null::new())
                }
            }

            impl Sub<Null> for $t {
                type Output = Dot;
                fn sub(self, _rhs: Null) -> Dot {
                    Dot::Null(Null::new())
                }
            }

            impl Mul<Null> for $t {
                type Output = Dot;
                fn mul(self, _rhs: Null) -> Dot {
                    Dot::Null(Null::new())
                }
            }

            impl Div<Null> for $t {
                type Output = Dot;
                fn div(self, _rhs: Null) -> Dot {
                    Dot::Null(Null::new())
                }
            }
        )*
    };
}

null_on_right!(i64, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Data;
    use serde_json::json;

    #[test]
    fn test_null_is_empty_and_falsy() {
        let n = Null::new();
        assert!(!n.is_truthy());
        assert!(!n.is_present());
        assert_eq!(n.len(), 0);
        assert_eq!(n.iter().count(), 0);
    }

    #[test]
    fn test_null_arithmetic_is_total() {
        assert!((Null::new() + 1).is_null());
        assert!((Null::new() - 1.5).is_null());
        assert!((Null::new() * "x").is_null());
        assert!((Null::new() / 0).is_null());
        assert!((-Null::new()).is_null());
        assert!((1i64 + Null::new()).is_null());
        assert!((2.0f64 / Null::new()).is_null());
    }

    #[test]
    fn test_null_plus_list_is_list() {
        let out = Null::new() + Value::from(json!([1, 2]));
        assert_eq!(out, json!([1, 2]));
    }

    #[test]
    fn test_null_or_and() {
        assert_eq!(Null::new() | 1, json!(1));
        assert_eq!(Null::new() & false, json!(false));
        assert!((Null::new() & true).is_null());
        assert!((Null::new() ^ 1).is_null());
    }

    #[test]
    fn test_null_equality() {
        let n = Null::new();
        assert_eq!(n, Null::new());
        assert_eq!(n.loose_eq(&Dot::Value(Value::Null)), Some(true));
        assert_eq!(n.loose_eq(&Dot::Value(Value::from(1))), None);
        assert!(n == Value::from(json!([])));
        assert!(n != Value::from(json!({})));
    }

    #[test]
    fn test_null_display() {
        assert_eq!(Null::new().to_string(), "None");
    }

    #[test]
    fn test_null_path_records_chain() {
        let data = Data::new();
        let Dot::Null(n) = data.get("a.b..c.d") else {
            panic!("expected null");
        };
        assert_eq!(n.path(), "a.b..c.d");
        assert_eq!(n.key(), Some("d"));
        assert!(n.is_attached());
        assert!(!Null::new().get("x").as_null().unwrap().is_attached());
    }

    #[test]
    fn test_assign_through_chain_materializes() {
        let data = Data::new();
        data.get("a.b").as_null().unwrap().assign(1).unwrap();
        assert_eq!(data, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_detached_write_is_dropped() {
        Null::new().set("a.b", 1).unwrap();
        Null::new().assign(1).unwrap();
    }

    #[test]
    fn test_null_value_write_is_noop() {
        let data = Data::new();
        data.get("a.b").set("c", Value::Null).unwrap();
        assert_eq!(data, json!({}));
    }

    #[test]
    fn test_iadd_assigns() {
        let data = Data::new();
        let out = data.get("a").as_null().unwrap().iadd(3).unwrap();
        assert_eq!(out, json!(3));
        assert_eq!(data, json!({"a": 3}));
    }
}
