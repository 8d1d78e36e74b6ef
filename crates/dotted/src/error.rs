use dotted_path::PathError;
use thiserror::Error;

/// Errors raised by writes, merges and the strict path entry points.
///
/// Reads never fail: a missing path yields [`crate::Null`].
#[derive(Error, Debug)]
pub enum DotsError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Path {path:?} does not exist")]
    PathNotFound { path: String },

    #[error("Ambiguous path {path:?}: {candidates:?} all match")]
    AmbiguousPath {
        path: String,
        candidates: Vec<String>,
    },

    #[error("can not add {left} with {right}")]
    AddMismatch { left: String, right: String },

    #[error("can not {op} {left} with {right}")]
    OpMismatch {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("DIVISION_BY_ZERO")]
    DivisionByZero,

    #[error("can not set {key:?} on {kind}")]
    NotContainer { key: String, kind: String },

    #[error("{type_name} has no field {field:?}")]
    NoField { type_name: String, field: String },

    #[error("{op}() not supported")]
    Unsupported { op: &'static str },

    #[error("key is empty string")]
    EmptyKey,

    #[error("slice step {step} is not supported")]
    SliceStep { step: i64 },

    #[error("cyclic structure at {path:?}")]
    Cycle { path: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DotsError {
    pub(crate) fn add_mismatch(left: &crate::Value, right: &crate::Value) -> Self {
        DotsError::AddMismatch {
            left: left.type_name(),
            right: right.type_name(),
        }
    }

    pub(crate) fn op_mismatch(op: &'static str, left: &crate::Value, right: &crate::Value) -> Self {
        DotsError::OpMismatch {
            op,
            left: left.type_name(),
            right: right.type_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_add_mismatch_names_both_kinds() {
        let err = DotsError::add_mismatch(&Value::from(1), &Value::from("x"));
        assert_eq!(err.to_string(), "can not add int with str");
    }

    #[test]
    fn test_path_error_is_transparent() {
        let err: DotsError = dotted_path::split_field("a...b").unwrap_err().into();
        assert!(err.to_string().contains("a...b"));
    }

    #[test]
    fn test_unsupported_message() {
        let err = DotsError::Unsupported { op: "clear" };
        assert_eq!(err.to_string(), "clear() not supported");
    }
}
