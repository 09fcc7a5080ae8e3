//! Dynamically typed values.
//!
//! Filter values, insert values and materialised row cells all share this
//! type, so every consumer matches on it exhaustively.

use serde::{Deserialize, Serialize};

/// A JSON-compatible scalar or array.
///
/// Serialises untagged: `Value::Integer(18)` is `18` on the wire,
/// `Value::Null` is `null`. JSON objects have no representation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL / JSON null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// Double precision float.
    Real(f64),
    /// UTF-8 text.
    Text(String),
    /// Array of values; only meaningful for membership filters.
    Array(Vec<Value>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the elements if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Array(_) => "array",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Real(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Integer(n) => Self::Number(n.into()),
            Value::Real(f) => serde_json::Number::from_f64(f).map_or(Self::Null, Self::Number),
            Value::Text(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Into::into).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_scalars() {
        let v: Value = serde_json::from_value(json!(18)).unwrap();
        assert_eq!(v, Value::Integer(18));
        let v: Value = serde_json::from_value(json!(2.5)).unwrap();
        assert_eq!(v, Value::Real(2.5));
        let v: Value = serde_json::from_value(json!("active")).unwrap();
        assert_eq!(v, Value::Text("active".into()));
        let v: Value = serde_json::from_value(json!(null)).unwrap();
        assert!(v.is_null());
    }

    #[test]
    fn test_deserialize_array() {
        let v: Value = serde_json::from_value(json!([1, "a", true])).unwrap();
        assert_eq!(
            v,
            Value::Array(vec![Value::Integer(1), "a".into(), Value::Bool(true)])
        );
    }

    #[test]
    fn test_object_is_rejected() {
        assert!(serde_json::from_value::<Value>(json!({"a": 1})).is_err());
        assert!(serde_json::from_value::<Value>(json!([{"a": 1}])).is_err());
    }

    #[test]
    fn test_serialize_untagged() {
        let row = vec![Value::Null, Value::Integer(3), Value::Text("x".into())];
        assert_eq!(serde_json::to_value(&row).unwrap(), json!([null, 3, "x"]));
    }

    #[test]
    fn test_into_json_non_finite_real() {
        assert_eq!(serde_json::Value::from(Value::Real(f64::NAN)), json!(null));
    }
}
