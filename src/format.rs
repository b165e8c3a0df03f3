//! Map File Format
//!
//! This module documents the map description format as accepted by
//! [`parse_str`](crate::parse_str) and written by [`to_string`](crate::to_string).
//!
//! # Overview
//!
//! A map file is plain UTF-8 text made of **tables**. Each table starts with a
//! `[Name]` header and holds **elements**, one `key : value` pair per logical
//! line. Values are typed: the parser decides int, float, bool, string, list
//! or table from the text alone.
//!
//! ```text
//! # comments run from `#` to the end of the line
//! [Map]
//! rows : 3
//! scale : 1.5
//! title : "The \"first\" floor"
//! grid : [[1, 1, 1],
//!         [1, 0, 1],
//!         [1, 1, 1]]     # one open cell
//! ```
//!
//! # Lines
//!
//! - Lines end at `\n`; a trailing `\r` is dropped.
//! - Leading and trailing whitespace is ignored.
//! - Blank lines and comment-only lines are skipped.
//! - `#` starts a comment only outside strings and outside any open `[`/`{`
//!   on the **same logical line**. A value that continues over several lines
//!   keeps its nesting across the line break, so `#` on a continuation line
//!   is a comment only once that value's brackets are all closed.
//!
//! # Tables
//!
//! ```text
//! [Tiles]
//! ```
//!
//! **Rules**:
//! - The line starts with `[` and `]` is its last character (after comment
//!   stripping).
//! - The name is non-empty and contains no whitespace and no brackets.
//! - A name may appear only once per file.
//! - Elements before the first header are errors.
//! - A table with no elements is allowed.
//!
//! # Elements
//!
//! ```text
//! key : value
//! ```
//!
//! **Rules**:
//! - The key is everything before the first `:` that sits outside strings,
//!   lists and tables, trimmed, and must not be empty.
//! - The value is everything after that colon, trimmed.
//! - Keys are unique within their table. Order is kept.
//!
//! # Values
//!
//! Classification is tried in this order:
//!
//! | Kind | Syntax | Example |
//! |------|--------|---------|
//! | Int | Optional sign, decimal digits, fits in `i64` | `-12` |
//! | Float | Decimal or exponent notation | `0.5`, `-3.`, `1e-3` |
//! | Bool | `true` or `false` (lowercase) | `fog : false` |
//! | String | `"..."` on one line | `"wall.png"` |
//! | List | `[a, b, ...]` | `[1, "two", [3]]` |
//! | Table | `{ k: v, ... }` | `{ id: 1, texture: "w.png" }` |
//!
//! Anything else is an error: text that starts like a number (digit, sign or
//! `.`) is an invalid number, everything else is an unrecognized value. Bare
//! words are never strings, and `inf`/`nan` are not floats. Integers that do
//! not fit in 64 bits are invalid numbers rather than floats, and so are
//! floats whose exponent overflows to infinity (`1e400`).
//!
//! ## Strings
//!
//! **Escape sequences**:
//! ```text
//! \"  - quote
//! \\  - backslash
//! ```
//!
//! Any other backslash pair is kept exactly as written. A string may not span
//! lines, and nothing but a comment may follow its closing quote.
//!
//! ## Lists and Tables
//!
//! - Items are separated by commas at the top nesting level. Commas inside
//!   strings or nested brackets do not split.
//! - Items may be of mixed kinds and nest up to
//!   [`MAX_NESTING`](crate::MAX_NESTING) lists and tables deep.
//! - `[]` and `{}` are empty.
//! - An empty item (`[1,,2]`) is an error. A trailing comma (`[1, 2,]`) is
//!   an error unless [`TrailingCommas::Allow`](crate::TrailingCommas::Allow)
//!   is set.
//! - Inline table entries use the same `key: value` form and the same
//!   duplicate-key rule as elements.
//! - A nested table is named after its key; a table inside a list is named
//!   `key[index]`.
//!
//! # Multi-line Values
//!
//! A value continues onto the following lines while it has an unclosed `[`,
//! `{` or `"`, or when nothing follows the colon at all:
//!
//! ```text
//! grid :
//!   [[0, 1],
//!    [1, 0]]
//! ```
//!
//! Continuation lines are joined before the value is classified, and every
//! error in the value is reported against the line the element started on.
//! Input ending while a value is still open, or before a value was given
//! after `key :`, is an unterminated-value error.
//!
//! # Output
//!
//! The writer emits one `key : value` line per element, lists and inline
//! tables on one line, floats always with a fractional part or exponent, and
//! a blank line between tables. Comments and the original layout are not
//! preserved.
