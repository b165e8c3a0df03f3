//! Writing documents back out as map text.
//!
//! Output is canonical rather than faithful: comments, blank lines and
//! multi-line layout from the source are not kept. Each table is written as a
//! header followed by one `key : value` line per element, with lists and
//! nested tables on a single line.
//!
//! ```rust
//! use mapparser::{parse_str, to_string};
//!
//! let doc = parse_str("[Map]\nrows:2 # rows\ngrid:[[0,1],\n [1,0]]").unwrap();
//! assert_eq!(to_string(&doc), "[Map]\nrows : 2\ngrid : [[0, 1], [1, 0]]\n");
//! ```
//!
//! Parsing the output again gives an equal document, except for floats that
//! are not finite and strings holding a newline, which the format has no
//! syntax for.

use crate::{Document, Table, Value};
use std::fmt::{self, Write};

/// Renders a whole document as map text.
#[must_use]
pub fn to_string(document: &Document) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_document(&mut out, document);
    out
}

pub(crate) fn write_document<W: Write>(out: &mut W, document: &Document) -> fmt::Result {
    for (i, table) in document.tables().enumerate() {
        if i > 0 {
            out.write_char('\n')?;
        }
        writeln!(out, "[{}]", table.name())?;
        for (key, value) in table.iter() {
            write!(out, "{} : ", key)?;
            write_value(out, value)?;
            out.write_char('\n')?;
        }
    }
    Ok(())
}

pub(crate) fn write_value<W: Write>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        Value::Bool(b) => write!(out, "{}", b),
        Value::Int(i) => write!(out, "{}", i),
        // Debug keeps the `.0` on whole floats so they read back as floats
        Value::Float(f) => write!(out, "{:?}", f),
        Value::String(s) => write_string(out, s),
        Value::List(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_value(out, item)?;
            }
            out.write_char(']')
        }
        Value::Table(table) => write_inline_table(out, table),
    }
}

fn write_string<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            other => out.write_char(other)?,
        }
    }
    out.write_char('"')
}

fn write_inline_table<W: Write>(out: &mut W, table: &Table) -> fmt::Result {
    if table.is_empty() {
        return out.write_str("{}");
    }
    out.write_str("{ ")?;
    for (i, (key, value)) in table.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{}: ", key)?;
        write_value(out, value)?;
    }
    out.write_str(" }")
}
