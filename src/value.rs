//! Typed values held by a parsed map document.
//!
//! Every element of a table is one of six kinds, modelled by the closed
//! [`Value`] enum. Lists hold values by position; tables hold values by key and
//! may nest without limit.
//!
//! ## Creating Values
//!
//! ```rust
//! use mapparser::Value;
//!
//! let flag = Value::from(true);
//! let count = Value::from(42);
//! let ratio = Value::from(0.5);
//! let name = Value::from("wall");
//! let row = Value::from(vec![Value::from(0), Value::from(1)]);
//!
//! assert!(flag.is_bool());
//! assert_eq!(count.as_int(), Some(42));
//! assert_eq!(name.as_str(), Some("wall"));
//! assert_eq!(row.as_list().map(|r| r.len()), Some(2));
//! # let _ = ratio;
//! ```
//!
//! ## Type Checking
//!
//! ```rust
//! use mapparser::{Value, ValueKind};
//!
//! let value = Value::from(5.0);
//! assert_eq!(value.kind(), ValueKind::Float);
//! assert!(!value.is_int());
//! ```

use crate::Table;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single typed value from a map document.
///
/// # Examples
///
/// ```rust
/// use mapparser::Value;
///
/// let value = Value::Int(5);
/// assert!(value.is_int());
/// assert_eq!(value.as_float(), Some(5.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Int(i64),
    Float(f64),
    List(Vec<Value>),
    Table(Table),
}

/// The kind of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    String,
    Int,
    Float,
    List,
    Table,
}

impl ValueKind {
    /// Returns the lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::List => "list",
            ValueKind::Table => "table",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed view of one keyed entry of a [`Table`].
///
/// # Examples
///
/// ```rust
/// use mapparser::{parse_str, ValueKind};
///
/// let doc = parse_str("[Player]\nspeed : 2").unwrap();
/// let elem = doc.table("Player").unwrap().element("speed").unwrap();
/// assert_eq!(elem.key(), "speed");
/// assert_eq!(elem.kind(), ValueKind::Int);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Element<'a> {
    key: &'a str,
    value: &'a Value,
}

impl<'a> Element<'a> {
    pub(crate) fn new(key: &'a str, value: &'a Value) -> Self {
        Element { key, value }
    }

    #[must_use]
    pub fn key(&self) -> &'a str {
        self.key
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    #[must_use]
    pub fn value(&self) -> &'a Value {
        self.value
    }
}

impl Value {
    /// Returns the kind tag of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::List(_) => ValueKind::List,
            Value::Table(_) => ValueKind::Table,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Floats are not truncated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapparser::Value;
    ///
    /// assert_eq!(Value::Int(7).as_int(), Some(7));
    /// assert_eq!(Value::Float(7.0).as_int(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is numeric, returns it as an `f64`. Integers are widened.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// If the value is a list, returns its items. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a nested table, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::ser::write_value(f, self)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::List(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Table(table) => table.serialize(serializer),
        }
    }
}

fn mismatch(expected: ValueKind, value: &Value) -> crate::Error {
    crate::Error::custom(format!("expected {}, found {}", expected, value.kind()))
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(mismatch(ValueKind::Int, &other)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(mismatch(ValueKind::Float, &other)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch(ValueKind::Bool, &other)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch(ValueKind::String, &other)),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from("x").kind(), ValueKind::String);
        assert_eq!(Value::Int(1).kind(), ValueKind::Int);
        assert_eq!(Value::Float(1.0).kind(), ValueKind::Float);
        assert_eq!(Value::List(vec![]).kind(), ValueKind::List);
        assert_eq!(Value::Table(Table::new("t")).kind(), ValueKind::Table);
    }

    #[test]
    fn test_accessors_do_not_coerce_strings() {
        let value = Value::from("5");
        assert_eq!(value.as_int(), None);
        assert_eq!(value.as_float(), None);
        assert_eq!(value.as_str(), Some("5"));
    }

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(Value::Int(42)).unwrap(), 42);
        assert!(i64::try_from(Value::Float(42.0)).is_err());

        let err = i64::try_from(Value::from("test")).unwrap_err();
        assert_eq!(err.to_string(), "expected int, found string");
    }

    #[test]
    fn test_tryfrom_f64_widens_ints() {
        assert_eq!(f64::try_from(Value::Float(3.5)).unwrap(), 3.5);
        assert_eq!(f64::try_from(Value::Int(3)).unwrap(), 3.0);
        assert!(f64::try_from(Value::Bool(true)).is_err());
    }

    #[test]
    fn test_tryfrom_bool_and_string() {
        assert!(bool::try_from(Value::Bool(true)).unwrap());
        assert!(bool::try_from(Value::Int(1)).is_err());
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
        assert!(String::try_from(Value::Int(1)).is_err());
    }

    #[test]
    fn test_serialize_json() {
        let value = Value::List(vec![
            Value::Int(1),
            Value::Float(2.5),
            Value::from("a"),
            Value::Bool(false),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1,2.5,"a",false]"#);
    }

    #[test]
    fn test_element_view() {
        let value = Value::Int(3);
        let elem = Element::new("x", &value);
        assert_eq!(elem.key(), "x");
        assert_eq!(elem.kind(), ValueKind::Int);
        assert_eq!(elem.value(), &Value::Int(3));
    }
}
