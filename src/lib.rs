//! # mapparser
//!
//! A parser for the sectioned key/value format used to describe game maps:
//! tile grids, tile catalogues, billboards and player spawn points.
//!
//! ## What does a map file look like?
//!
//! ```text
//! # level one
//! [Map]
//! rows : 3
//! cols : 4
//! grid : [[1, 1, 1, 1],
//!         [1, 0, 2, 1],
//!         [1, 1, 1, 1]]
//!
//! [Tiles]
//! wall  : { id: 1, texture: "wall.png" }
//! glass : { id: 2, color: [0, 128, 255, 255], transparent: true }
//! ```
//!
//! A file is a sequence of `[Name]` tables, each holding `key : value`
//! elements. Values are ints, floats, bools, double-quoted strings, `[...]`
//! lists and `{...}` tables, nested freely. See [`format`](mod@format) for the full rules.
//!
//! ## Key Features
//!
//! - **Ordered**: tables and keys iterate in source order
//! - **Strict**: duplicate tables, duplicate keys, unknown values and
//!   unterminated values are errors carrying the line they start on
//! - **Multi-line values**: a list, table or string left open at the end of a
//!   line continues onto the next
//! - **Serde Compatible**: read tables straight into your own types with
//!   `#[derive(Deserialize)]`
//! - **Typed levels**: [`Level`] validates and exposes the grid, tiles and
//!   billboards a renderer needs
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! mapparser = "0.1"
//! ```
//!
//! ### Parsing and lookups
//!
//! ```rust
//! use mapparser::{parse_str, ValueKind};
//!
//! let doc = parse_str("[Map]\nrows : 3\nscale : 1.5\nname : \"Crypt\"").unwrap();
//!
//! let map = doc.require_table("Map").unwrap();
//! assert_eq!(map.get_int("rows").unwrap(), 3);
//! assert_eq!(map.get_float("scale").unwrap(), 1.5);
//! assert_eq!(map.element("name").unwrap().kind(), ValueKind::String);
//! ```
//!
//! ### Reading a file
//!
//! ```rust,no_run
//! use mapparser::MapParser;
//!
//! let mut parser = MapParser::new("levels/one.map");
//! match parser.parse() {
//!     Ok(doc) => println!("{} tables", doc.len()),
//!     // Error parsing map file "levels/one.map" (Line 7): ...
//!     Err(err) => eprintln!("{}", err),
//! }
//! ```
//!
//! ### Deserializing tables
//!
//! ```rust
//! use mapparser::{from_table, parse_str};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, PartialEq, Debug)]
//! struct Player { x: f64, y: f64, name: String }
//!
//! let doc = parse_str("[Player]\nx : 1.5\ny : 2\nname : \"Ann\"").unwrap();
//! let player: Player = from_table(doc.table("Player").unwrap()).unwrap();
//! assert_eq!(player, Player { x: 1.5, y: 2.0, name: "Ann".into() });
//! ```
//!
//! ### Building values with mapvalue!
//!
//! ```rust
//! use mapparser::{mapvalue, Value};
//!
//! let tile = mapvalue!({ "id": 2, "color": [0, 128, 255, 255], "transparent": true });
//! assert_eq!(tile.as_table().unwrap().get("id"), Some(&Value::Int(2)));
//! ```
//!
//! ## Logging
//!
//! File parsing emits [`tracing`] events: `debug` when a file is opened and
//! parsed, `trace` for each table and element. Nothing is printed unless the
//! application installs a subscriber.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics on malformed input; every failure is an [`Error`]
//! - Values nest at most [`MAX_NESTING`] lists and tables deep
//! - The first error aborts the parse and no partial document is returned

pub mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod level;
pub mod macros;
pub mod options;
pub mod parser;
mod scan;
pub mod ser;
pub mod table;
pub mod value;

pub use de::{from_document, from_str, from_table, from_value, TableDeserializer, ValueDeserializer};
pub use document::Document;
pub use error::{Error, ErrorKind, Result};
pub use level::{Appearance, Billboard, Level, MapGrid, Spawn, Tile, GROUND};
pub use options::{ParseOptions, TrailingCommas};
pub use parser::{parse_file, parse_reader, parse_str_with_options, MapParser, MAX_NESTING};
pub use ser::to_string;
pub use table::Table;
pub use value::{Element, Value, ValueKind};

/// Parses map text with the default [`ParseOptions`].
///
/// # Examples
///
/// ```rust
/// use mapparser::{parse_str, Value};
///
/// let doc = parse_str("[Tiles]\nwall : { id: 1, texture: \"wall.png\" }").unwrap();
/// let wall = doc.get("Tiles", "wall").unwrap().as_table().unwrap();
/// assert_eq!(wall.get("id"), Some(&Value::Int(1)));
/// ```
///
/// # Errors
///
/// Returns the first structural or value error, with the line it occurred
/// on.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(input: &str) -> Result<Document> {
    parse_str_with_options(input, &ParseOptions::default())
}

/// Parses map text held in bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or any error
/// [`parse_str`] returns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice(input: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(input).map_err(|e| Error::custom(e.to_string()))?;
    parse_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Settings {
        rows: u32,
        fog: bool,
        items: Vec<i32>,
    }

    #[test]
    fn test_parse_and_lookup() {
        let doc = parse_str("[Settings]\nrows : 20\nfog : false\nitems : [1, 2, 3]").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("Settings", "rows"), Some(&Value::Int(20)));
        assert!(doc.get("Settings", "cols").is_none());
        assert!(doc.get("Other", "rows").is_none());
    }

    #[test]
    fn test_parse_then_deserialize() {
        let doc = parse_str("[Settings]\nrows : 20\nfog : false\nitems : [1,\n 2,\n 3]").unwrap();
        let settings: Settings = from_table(doc.table("Settings").unwrap()).unwrap();
        assert_eq!(
            settings,
            Settings {
                rows: 20,
                fog: false,
                items: vec![1, 2, 3]
            }
        );
    }

    #[test]
    fn test_write_then_parse() {
        let doc = parse_str("[A]\nx : 1.0\ny : [\"a\", { b: true }]").unwrap();
        assert_eq!(parse_str(&to_string(&doc)).unwrap(), doc);
    }

    #[test]
    fn test_options_reach_the_parser() {
        let source = "[A]\nlist : [1, 2,]";
        assert!(parse_str(source).is_err());

        let options = ParseOptions::new().with_trailing_commas(TrailingCommas::Allow);
        let doc = parse_str_with_options(source, &options).unwrap();
        assert_eq!(doc.get("A", "list").and_then(Value::as_list).map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_parse_slice() {
        let doc = parse_slice(b"[A]\nx : 1").unwrap();
        assert_eq!(doc.get("A", "x"), Some(&Value::Int(1)));

        let err = parse_slice(&[b'[', 0xff, b']']).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Custom);
    }
}
