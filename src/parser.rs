//! Map file parsing.
//!
//! Parsing runs in three layers:
//!
//! - **Line assembly**: comments are stripped, blank lines skipped, and a value
//!   left open at the end of a line (an unclosed `[`, `{` or `"`, or nothing
//!   at all after the colon) swallows the following lines until it closes.
//! - **Structure**: `[Name]` headers open tables; every other line is split
//!   into key and value at its first top-level colon.
//! - **Values**: the raw value text is classified as int, float, bool,
//!   string, list or table, recursing into lists and tables.
//!
//! The first error aborts the parse; no partial document is returned.
//!
//! ```rust
//! use mapparser::{parse_str, Value};
//!
//! let doc = parse_str(
//!     "[Settings]\n\
//!      items : [1,\n  2,\n  3]   # three items\n\
//!      box : { w: 10, h: 20 }",
//! ).unwrap();
//!
//! let settings = doc.table("Settings").unwrap();
//! assert_eq!(settings.get_list("items").unwrap().len(), 3);
//! assert_eq!(settings.get_table("box").unwrap().get("h"), Some(&Value::Int(20)));
//! ```

use crate::options::ParseOptions;
use crate::scan::{self, Nesting};
use crate::{Document, Error, Result, Table, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A value whose text is still being collected, possibly over several lines.
struct Pending {
    key: String,
    text: String,
    line: usize,
    nesting: Nesting,
}

impl Pending {
    fn is_complete(&self) -> bool {
        !self.text.is_empty() && !self.nesting.is_open()
    }

    /// The error to report when input ends before the value closes.
    fn unterminated(&self) -> Error {
        if self.nesting.in_string() {
            Error::UnterminatedString { line: self.line }
        } else if let Some(expected) = self.nesting.expected_closer() {
            Error::UnterminatedValue {
                line: self.line,
                expected,
            }
        } else {
            Error::MissingValue { line: self.line }
        }
    }
}

/// Builds a [`Document`] from physical lines fed one at a time.
///
/// No table yet means every element line is an error; a header always starts
/// a fresh table.
struct Assembler<'o> {
    options: &'o ParseOptions,
    document: Document,
    current: Option<Table>,
    pending: Option<Pending>,
}

impl<'o> Assembler<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Assembler {
            options,
            document: Document::new(),
            current: None,
            pending: None,
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) -> Result<()> {
        if let Some(pending) = self.pending.as_mut() {
            let kept = scan::strip_comment(raw, &mut pending.nesting).trim();
            if !kept.is_empty() {
                if !pending.text.is_empty() {
                    pending.text.push('\n');
                }
                pending.text.push_str(kept);
            }
            if pending.is_complete() {
                if let Some(done) = self.pending.take() {
                    self.finish_element(done)?;
                }
            }
            return Ok(());
        }

        let line = scan::strip_comment(raw, &mut Nesting::default()).trim();
        if line.is_empty() {
            return Ok(());
        }

        if line.starts_with('[') {
            return self.open_table(line_no, line);
        }

        let Some((key, value)) = scan::split_key_value(line) else {
            if self.current.is_none() {
                return Err(Error::OutsideTable {
                    line: line_no,
                    key: line.to_string(),
                });
            }
            return Err(Error::MissingSeparator { line: line_no });
        };

        if self.current.is_none() {
            return Err(Error::OutsideTable {
                line: line_no,
                key: key.to_string(),
            });
        }
        if key.is_empty() {
            return Err(Error::MissingSeparator { line: line_no });
        }

        let pending = Pending {
            key: key.to_string(),
            text: value.to_string(),
            line: line_no,
            nesting: Nesting::scan(value),
        };
        if pending.is_complete() {
            self.finish_element(pending)
        } else {
            self.pending = Some(pending);
            Ok(())
        }
    }

    fn open_table(&mut self, line_no: usize, line: &str) -> Result<()> {
        let malformed = |msg: String| Error::MalformedHeader { line: line_no, msg };

        let name = line[1..]
            .strip_suffix(']')
            .ok_or_else(|| malformed("`]` must be the last character of the line".to_string()))?;
        if name.is_empty() {
            return Err(malformed("table name is empty".to_string()));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(malformed(format!("table name \"{}\" contains whitespace", name)));
        }
        if name.contains(['[', ']']) {
            return Err(malformed(format!("table name \"{}\" contains brackets", name)));
        }

        let taken = self.document.contains_table(name)
            || self.current.as_ref().is_some_and(|t| t.name() == name);
        if taken {
            return Err(Error::DuplicateTable {
                line: line_no,
                name: name.to_string(),
            });
        }

        trace!(line = line_no, table = name, "table header");
        self.close_table();
        self.current = Some(Table::new(name));
        Ok(())
    }

    fn close_table(&mut self) {
        if let Some(table) = self.current.take() {
            // names are checked when the header is read
            let _ = self.document.push_table(table);
        }
    }

    fn finish_element(&mut self, pending: Pending) -> Result<()> {
        let Pending { key, text, line, .. } = pending;
        if text.contains('\n') {
            debug!(line, key = %key, "value spans several lines");
        }

        let value = ValueParser::new(self.options, line).parse(&text, &key)?;
        trace!(line, key = %key, kind = %value.kind(), "element");

        let table = self.current.as_mut().ok_or_else(|| Error::OutsideTable {
            line,
            key: key.clone(),
        })?;
        if !table.insert(key.clone(), value) {
            return Err(Error::DuplicateKey { line, key });
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Document> {
        if let Some(pending) = self.pending.take() {
            return Err(pending.unterminated());
        }
        self.close_table();
        Ok(self.document)
    }
}

/// How many lists and tables a value may nest before parsing gives up.
pub const MAX_NESTING: usize = 128;

/// Classifies raw value text into a [`Value`], recursing into lists and tables.
///
/// Errors are reported against the line the element started on.
#[derive(Clone, Copy)]
pub(crate) struct ValueParser<'o> {
    options: &'o ParseOptions,
    line: usize,
    depth: usize,
}

impl<'o> ValueParser<'o> {
    pub(crate) fn new(options: &'o ParseOptions, line: usize) -> Self {
        ValueParser {
            options,
            line,
            depth: 0,
        }
    }

    /// The parser for the items of a list or table at the current depth.
    fn nested(&self) -> Result<Self> {
        if self.depth >= MAX_NESTING {
            return Err(Error::TooDeep {
                line: self.line,
                limit: MAX_NESTING,
            });
        }
        Ok(ValueParser {
            depth: self.depth + 1,
            ..*self
        })
    }

    /// Parses one value. `key` names nested tables and has no other effect.
    pub(crate) fn parse(&self, raw: &str, key: &str) -> Result<Value> {
        let text = raw.trim();
        let Some(first) = text.chars().next() else {
            return Err(Error::EmptyValue { line: self.line });
        };

        if let Ok(i) = text.parse::<i64>() {
            return Ok(Value::Int(i));
        }
        if is_integer_shaped(text) {
            // all digits but out of range for i64
            return Err(self.invalid_number(text));
        }
        if is_float_shaped(text) {
            match text.parse::<f64>() {
                Ok(f) if f.is_finite() => return Ok(Value::Float(f)),
                // exponent too large for f64
                Ok(_) => return Err(self.invalid_number(text)),
                Err(_) => {}
            }
        }

        match text {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }

        match first {
            '"' => self.parse_string(text).map(Value::String),
            '[' => self.parse_list(text, key),
            '{' => self.parse_table(text, key),
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => {
                Err(self.invalid_number(text))
            }
            _ => Err(Error::UnrecognizedValue {
                line: self.line,
                value: text.to_string(),
            }),
        }
    }

    fn invalid_number(&self, text: &str) -> Error {
        Error::InvalidNumber {
            line: self.line,
            value: text.to_string(),
        }
    }

    fn trailing(&self, rest: &str) -> Result<()> {
        let rest = rest.trim();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(Error::TrailingCharacters {
                line: self.line,
                rest: rest.to_string(),
            })
        }
    }

    /// Parses `"..."`, decoding `\"` and `\\`. Other escapes are kept as written.
    fn parse_string(&self, text: &str) -> Result<String> {
        let mut result = String::new();
        let mut chars = text.char_indices().skip(1);

        while let Some((i, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.trailing(&text[i + 1..])?;
                    return Ok(result);
                }
                '\n' => return Err(Error::MultilineString { line: self.line }),
                '\\' => match chars.next() {
                    Some((_, '"')) => result.push('"'),
                    Some((_, '\\')) => result.push('\\'),
                    Some((_, '\n')) => return Err(Error::MultilineString { line: self.line }),
                    Some((_, other)) => {
                        result.push('\\');
                        result.push(other);
                    }
                    None => break,
                },
                other => result.push(other),
            }
        }
        Err(Error::UnterminatedString { line: self.line })
    }

    /// Returns the inside of a `open ... close` value, checking nothing follows it.
    fn delimited<'t>(&self, text: &'t str, open: char, close: char) -> Result<&'t str> {
        let end = scan::find_matching(text, open, close).ok_or(Error::UnterminatedValue {
            line: self.line,
            expected: close,
        })?;
        self.trailing(&text[end + close.len_utf8()..])?;
        Ok(&text[open.len_utf8()..end])
    }

    /// Splits the inside of a list or table into its comma-separated fragments.
    fn fragments<'t>(&self, inner: &'t str) -> Vec<&'t str> {
        if inner.trim().is_empty() {
            return Vec::new();
        }
        let mut fragments = scan::split_top_level(inner);
        if self.options.allows_trailing_comma()
            && fragments.len() > 1
            && fragments.last().is_some_and(|f| f.is_empty())
        {
            fragments.pop();
        }
        fragments
    }

    fn parse_list(&self, text: &str, key: &str) -> Result<Value> {
        let child = self.nested()?;
        let inner = self.delimited(text, '[', ']')?;
        let items = self
            .fragments(inner)
            .into_iter()
            .enumerate()
            .map(|(i, fragment)| child.parse(fragment, &format!("{}[{}]", key, i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::List(items))
    }

    fn parse_table(&self, text: &str, key: &str) -> Result<Value> {
        let child = self.nested()?;
        let inner = self.delimited(text, '{', '}')?;
        let mut table = Table::new(key);

        for fragment in self.fragments(inner) {
            if fragment.is_empty() {
                return Err(Error::EmptyValue { line: self.line });
            }
            let (entry_key, raw) = scan::split_key_value(fragment)
                .filter(|(k, _)| !k.is_empty())
                .ok_or(Error::MissingSeparator { line: self.line })?;

            let value = child.parse(raw, entry_key)?;
            if !table.insert(entry_key, value) {
                return Err(Error::DuplicateKey {
                    line: self.line,
                    key: entry_key.to_string(),
                });
            }
        }
        Ok(Value::Table(table))
    }
}

/// Optional sign followed by at least one ASCII digit and nothing else.
fn is_integer_shaped(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Only digits, signs, `.` and exponent markers, with at least one digit.
/// Keeps words like `inf` and `NaN` out of the float parse.
fn is_float_shaped(text: &str) -> bool {
    text.bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && text.bytes().any(|b| b.is_ascii_digit())
}

fn parse_lines<I>(lines: I, options: &ParseOptions) -> Result<Document>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut assembler = Assembler::new(options);
    for (index, line) in lines.into_iter().enumerate() {
        assembler.feed(index + 1, &line?)?;
    }
    assembler.finish()
}

/// Parses map text with the given options.
///
/// # Errors
///
/// Returns the first structural or value error, tagged with its line.
pub fn parse_str_with_options(input: &str, options: &ParseOptions) -> Result<Document> {
    let mut assembler = Assembler::new(options);
    for (index, line) in input.lines().enumerate() {
        assembler.feed(index + 1, line)?;
    }
    assembler.finish()
}

/// Parses map text read from `reader`, line by line.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails (including invalid UTF-8) or the
/// first parse error otherwise.
pub fn parse_reader<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Document> {
    parse_lines(
        reader
            .lines()
            .map(|line| line.map_err(|e| Error::io("<reader>", &e))),
        options,
    )
}

fn parse_path(path: &Path, options: &ParseOptions) -> Result<Document> {
    debug!(path = %path.display(), "parsing map file");
    let file = File::open(path).map_err(|e| Error::io(path, &e))?;
    let lines = BufReader::new(file)
        .lines()
        .map(|line| line.map_err(|e| Error::io(path, &e)));

    let document = parse_lines(lines, options).map_err(|e| e.in_file(path))?;
    debug!(path = %path.display(), tables = document.len(), "parsed map file");
    Ok(document)
}

/// A parser bound to one map file.
///
/// The file is opened, read and closed inside [`MapParser::parse`]; the
/// resulting [`Document`] stays with the parser until it is taken with
/// [`MapParser::into_result`] or the parser is dropped.
///
/// # Examples
///
/// ```rust,no_run
/// use mapparser::MapParser;
///
/// let mut parser = MapParser::new("maps/level1.map");
/// match parser.parse() {
///     Ok(doc) => println!("{} tables", doc.len()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
#[derive(Debug)]
pub struct MapParser {
    path: PathBuf,
    options: ParseOptions,
    result: Option<Document>,
}

impl MapParser {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, ParseOptions::default())
    }

    #[must_use]
    pub fn with_options(path: impl Into<PathBuf>, options: ParseOptions) -> Self {
        MapParser {
            path: path.into(),
            options,
            result: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the file, or returns the document from an earlier successful call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::File`]
    /// wrapping the first parse error.
    pub fn parse(&mut self) -> Result<&Document> {
        if self.result.is_none() {
            self.result = Some(parse_path(&self.path, &self.options)?);
        }
        self.result
            .as_ref()
            .ok_or_else(|| Error::custom("parser holds no document"))
    }

    /// The parsed document, or `None` if [`parse`](Self::parse) has not succeeded.
    #[must_use]
    pub fn result(&self) -> Option<&Document> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn into_result(self) -> Option<Document> {
        self.result
    }
}

/// Parses the map file at `path` with default options.
///
/// # Errors
///
/// See [`MapParser::parse`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    parse_path(path.as_ref(), &ParseOptions::default())
}
