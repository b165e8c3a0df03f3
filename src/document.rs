//! The parsed document: an ordered set of uniquely named tables.

use crate::{Error, Result, Table, Value};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// The result of parsing one map file.
///
/// A document only ever comes out of a successful parse (or is assembled
/// table by table); consumers read it through shared references.
///
/// # Examples
///
/// ```rust
/// use mapparser::parse_str;
///
/// let doc = parse_str("[Map]\nrows : 2\n\n[Player]\nx : 1.5").unwrap();
/// assert!(doc.contains_table("Map"));
/// assert_eq!(doc.get("Player", "x").and_then(|v| v.as_float()), Some(1.5));
/// assert_eq!(doc.tables().map(|t| t.name()).collect::<Vec<_>>(), ["Map", "Player"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    tables: IndexMap<String, Table>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a table when assembling a document by hand, for instance to
    /// write a generated level with [`to_string`](crate::to_string).
    ///
    /// Tables keep the order they were pushed in. A table whose name is
    /// already present is handed back unchanged and the document is left as
    /// it was.
    ///
    /// ```rust
    /// use mapparser::{parse_str, to_string, Document, Table, Value};
    ///
    /// let mut player = Table::new("Player");
    /// player.insert("x", Value::Float(1.5));
    ///
    /// let mut doc = Document::new();
    /// doc.push_table(player.clone()).unwrap();
    /// assert!(doc.push_table(player).is_err());
    ///
    /// assert_eq!(parse_str(&to_string(&doc)).unwrap(), doc);
    /// ```
    pub fn push_table(&mut self, table: Table) -> std::result::Result<(), Table> {
        if self.tables.contains_key(table.name()) {
            return Err(table);
        }
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    #[must_use]
    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Looks up a table, failing with [`Error::MissingTable`] when it is absent.
    pub fn require_table(&self, name: &str) -> Result<&Table> {
        self.table(name).ok_or_else(|| Error::MissingTable {
            name: name.to_string(),
        })
    }

    /// Shorthand for `table(table)?.get(key)`.
    #[must_use]
    pub fn get(&self, table: &str, key: &str) -> Option<&Value> {
        self.table(table).and_then(|t| t.get(key))
    }

    /// Iterates over the tables in source order.
    pub fn tables(&self) -> indexmap::map::Values<'_, String, Table> {
        self.tables.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.tables.len() == other.tables.len() && self.tables.iter().eq(other.tables.iter())
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (name, table) in &self.tables {
            map.serialize_entry(name, table)?;
        }
        map.end()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::ser::write_document(f, self)
    }
}
