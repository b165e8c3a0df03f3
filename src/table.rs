//! Named tables of keyed values.
//!
//! A [`Table`] is what a `[Name]` header introduces, and also what a `{ ... }`
//! value parses into. Entries are kept in an [`IndexMap`] so iteration follows
//! source order, and keys are unique: inserting an existing key is refused
//! rather than overwriting it.
//!
//! ## Examples
//!
//! ```rust
//! use mapparser::{Table, Value};
//!
//! let mut table = Table::new("Player");
//! assert!(table.insert("speed", Value::from(2)));
//! assert!(!table.insert("speed", Value::from(3)));
//!
//! assert_eq!(table.get_int("speed").unwrap(), 2);
//! assert!(table.get_str("speed").is_err());
//! ```

use crate::value::{Element, Value, ValueKind};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A named, ordered collection of uniquely keyed values.
///
/// Equality compares entries (keys, order and values) but not the name:
/// nested tables take their name from the key that holds them, so the name is
/// a label for diagnostics rather than part of the data.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    entries: IndexMap<String, Value>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    /// The header name for top-level tables, or the owning key for nested ones.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a value under `key`, returning `false` (and leaving the table
    /// untouched) if the key is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> bool {
        match self.entries.entry(key.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a reference to the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the keyed element view for `key`.
    #[must_use]
    pub fn element(&self, key: &str) -> Option<Element<'_>> {
        self.entries
            .get_key_value(key)
            .map(|(k, v)| Element::new(k, v))
    }

    /// Iterates over every element in source order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        self.entries.iter().map(|(k, v)| Element::new(k, v))
    }

    /// Returns an iterator over the key-value pairs of the table, in source order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Returns an iterator over the keys of the table, in source order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `key`, failing with [`Error::MissingKey`] when it is absent.
    pub fn require(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::MissingKey {
            table: self.name.clone(),
            key: key.to_string(),
        })
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: ValueKind,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T> {
        let value = self.require(key)?;
        extract(value).ok_or_else(|| Error::TypeMismatch {
            key: key.to_string(),
            expected,
            found: value.kind(),
        })
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.typed(key, ValueKind::Bool, Value::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.typed(key, ValueKind::Int, Value::as_int)
    }

    /// Reads a float; integer values are widened.
    pub fn get_float(&self, key: &str) -> Result<f64> {
        self.typed(key, ValueKind::Float, Value::as_float)
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        self.typed(key, ValueKind::String, Value::as_str)
    }

    pub fn get_list(&self, key: &str) -> Result<&[Value]> {
        self.typed(key, ValueKind::List, Value::as_list)
    }

    pub fn get_table(&self, key: &str) -> Result<&Table> {
        self.typed(key, ValueKind::Table, Value::as_table)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(other.entries.iter()).all(|(a, b)| a == b)
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
