//! Dotted-path access over nested data, with null propagation.
//!
//! [`Value`] is a native tree of shared mappings and lists. Reading a path
//! from it never fails: a missing step yields [`Null`], which stays null
//! through further reads and arithmetic, and which can still be written
//! through to create the structure it stands for.
//!
//! Reads return a [`Dot`], the view matching the value's kind:
//!
//! - mappings are [`Data`],
//! - lists are [`FlatList`] (clamped slices, projection over elements),
//! - application records implementing [`Fields`] are [`DataObject`],
//! - absence is [`Null`].
//!
//! Views hold the native handle, never a copy, so writes through a view land
//! in the original structure and [`unwrap`] gives the same handle back.
//!
//! # Example
//!
//! ```
//! use dotted::Data;
//! use serde_json::json;
//!
//! let mut data = Data::new();
//! data.set("a.b.c", 5).unwrap();
//! assert_eq!(data.get("a.b.c"), json!(5));
//!
//! // reads past the end are null, and stay null
//! let missing = data.get("a.x.y");
//! assert!(missing.is_null());
//! assert!(missing.add(1).unwrap().is_null());
//!
//! // writing null deletes
//! data.set("a.b.c", None::<i64>).unwrap();
//! assert!(!data.contains("a.b.c"));
//! ```

pub mod access;
pub mod data;
pub mod dot;
pub mod error;
pub mod json;
pub mod leaves;
pub mod list;
pub mod merge;
pub mod null;
pub mod object;
pub mod registry;
pub mod util;
pub mod value;

pub use access::{get_attr, set_attr};
pub use data::Data;
pub use dot::{unwrap, wrap, Dot};
pub use error::DotsError;
pub use leaves::{leaves, leaves_to_data};
pub use list::FlatList;
pub use merge::set_default;
pub use null::Null;
pub use object::{DataObject, Fields, Record};
pub use registry::{Kind, Registry};
pub use util::{
    coalesce, exists, hash_value, is_missing, is_not_null, is_null, last, listwrap, unwraplist,
    zip,
};
pub use value::{List, Map, Object, Value};

pub use dotted_path::{
    concat_field, endswith_field, join_field, literal_field, relative_field, split_field,
    startswith_field, tail_field, unliteral_field, PathError,
};
