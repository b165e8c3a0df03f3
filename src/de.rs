//! Deserializing parsed documents into Rust types.
//!
//! A parsed [`Document`] looks to serde like a map from table name to table,
//! and every [`Table`] like a map from key to value. Lists are sequences,
//! strings borrow from the document, and optional fields are simply left out
//! of the table.
//!
//! ```rust
//! use mapparser::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Player {
//!     x: f32,
//!     y: f32,
//!     speed: u8,
//!     #[serde(default)]
//!     god_mode: bool,
//! }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! #[serde(rename_all = "PascalCase")]
//! struct Save {
//!     player: Player,
//! }
//!
//! let save: Save = from_str("[Player]\nx : 1.5\ny : 2\nspeed : 3").unwrap();
//! assert_eq!(save.player, Player { x: 1.5, y: 2.0, speed: 3, god_mode: false });
//! ```
//!
//! Enums are read from a string (unit variants) or from a nested table with a
//! single entry naming the variant.

use crate::{parse_str, Document, Error, Result, Table, Value};
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeOwned, DeserializeSeed, IntoDeserializer, Visitor};
use serde::{forward_to_deserialize_any, Deserialize, Deserializer};

/// Parses map text and deserializes the whole document into `T`.
///
/// # Errors
///
/// Returns the parse error, or an [`Error::Custom`] describing why the
/// document does not fit `T`.
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    let document = parse_str(input)?;
    from_document(&document)
}

/// Deserializes a parsed document; table names are the top-level keys.
///
/// # Errors
///
/// Returns an error if the document does not match the shape of `T`.
pub fn from_document<'de, T: Deserialize<'de>>(document: &'de Document) -> Result<T> {
    T::deserialize(DocumentDeserializer { document })
}

/// Deserializes a single table.
///
/// # Examples
///
/// ```rust
/// use mapparser::{from_table, parse_str};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Window { width: u32, height: u32, title: String }
///
/// let doc = parse_str("[Window]\nwidth : 1280\nheight : 720\ntitle : \"Maze\"").unwrap();
/// let window: Window = from_table(doc.table("Window").unwrap()).unwrap();
/// assert_eq!((window.width, window.height), (1280, 720));
/// ```
///
/// # Errors
///
/// Returns an error if the table does not match the shape of `T`.
pub fn from_table<'de, T: Deserialize<'de>>(table: &'de Table) -> Result<T> {
    T::deserialize(TableDeserializer { table })
}

/// Deserializes a single value.
///
/// # Errors
///
/// Returns an error if the value does not match the shape of `T`.
pub fn from_value<'de, T: Deserialize<'de>>(value: &'de Value) -> Result<T> {
    T::deserialize(ValueDeserializer { value })
}

/// Wraps a deserialization failure with the key it happened under.
fn under_key(key: &str, err: Error) -> Error {
    match err {
        Error::Custom(msg) => Error::Custom(format!("key \"{}\": {}", key, msg)),
        other => other,
    }
}

/// Serde deserializer over a borrowed [`Value`].
#[derive(Clone, Copy, Debug)]
pub struct ValueDeserializer<'de> {
    value: &'de Value,
}

impl<'de> ValueDeserializer<'de> {
    #[must_use]
    pub fn new(value: &'de Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> IntoDeserializer<'de, Error> for &'de Value {
    type Deserializer = ValueDeserializer<'de>;

    fn into_deserializer(self) -> Self::Deserializer {
        ValueDeserializer::new(self)
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Int(i) => visitor.visit_i64(*i),
            Value::Float(f) => visitor.visit_f64(*f),
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::List(items) => visitor.visit_seq(ListAccess { iter: items.iter() }),
            Value::Table(table) => TableDeserializer::new(table).deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        // an absent key is the only way to spell None
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(VariantAccess {
                variant: variant.as_str(),
                value: None,
            }),
            Value::Table(table) if table.len() == 1 => match table.iter().next() {
                Some((variant, value)) => visitor.visit_enum(VariantAccess {
                    variant: variant.as_str(),
                    value: Some(value),
                }),
                None => Err(Error::custom("expected a single-entry table for enum")),
            },
            other => Err(Error::custom(format!(
                "expected a string or a single-entry table for enum, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

/// Serde deserializer over a borrowed [`Table`].
#[derive(Clone, Copy, Debug)]
pub struct TableDeserializer<'de> {
    table: &'de Table,
}

impl<'de> TableDeserializer<'de> {
    #[must_use]
    pub fn new(table: &'de Table) -> Self {
        TableDeserializer { table }
    }
}

impl<'de> de::Deserializer<'de> for TableDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(TableAccess {
            iter: self.table.iter(),
            value: None,
        })
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct DocumentDeserializer<'de> {
    document: &'de Document,
}

impl<'de> de::Deserializer<'de> for DocumentDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(DocumentAccess {
            iter: self.document.tables(),
            table: None,
        })
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct ListAccess<'de> {
    iter: std::slice::Iter<'de, Value>,
}

impl<'de> de::SeqAccess<'de> for ListAccess<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct TableAccess<'de> {
    iter: indexmap::map::Iter<'de, String, Value>,
    value: Option<(&'de str, &'de Value)>,
}

impl<'de> de::MapAccess<'de> for TableAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some((key.as_str(), value));
                seed.deserialize(BorrowedStrDeserializer::<Error>::new(key))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let (key, value) = self
            .value
            .take()
            .ok_or_else(|| Error::custom("value requested before key"))?;
        seed.deserialize(ValueDeserializer::new(value))
            .map_err(|e| under_key(key, e))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct DocumentAccess<'de> {
    iter: indexmap::map::Values<'de, String, Table>,
    table: Option<&'de Table>,
}

impl<'de> de::MapAccess<'de> for DocumentAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(table) => {
                self.table = Some(table);
                seed.deserialize(BorrowedStrDeserializer::<Error>::new(table.name()))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let table = self
            .table
            .take()
            .ok_or_else(|| Error::custom("value requested before key"))?;
        seed.deserialize(TableDeserializer::new(table))
            .map_err(|e| match e {
                Error::Custom(msg) => {
                    Error::Custom(format!("table \"{}\": {}", table.name(), msg))
                }
                other => other,
            })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct VariantAccess<'de> {
    variant: &'de str,
    value: Option<&'de Value>,
}

impl<'de> de::EnumAccess<'de> for VariantAccess<'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.variant))?;
        Ok((variant, self))
    }
}

impl<'de> de::VariantAccess<'de> for VariantAccess<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(_) => Err(Error::custom(format!(
                "variant \"{}\" takes no value",
                self.variant
            ))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom(format!(
                "variant \"{}\" needs a value",
                self.variant
            ))),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(value) => ValueDeserializer::new(value).deserialize_seq(visitor),
            None => Err(Error::custom(format!(
                "variant \"{}\" needs a list",
                self.variant
            ))),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(value) => ValueDeserializer::new(value).deserialize_map(visitor),
            None => Err(Error::custom(format!(
                "variant \"{}\" needs a table",
                self.variant
            ))),
        }
    }
}
