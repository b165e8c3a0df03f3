//! Error types for map file parsing and document lookups.
//!
//! Parsing never recovers: the first problem found aborts the whole parse and
//! is returned as an [`Error`] carrying the line it was detected on. When a
//! file is parsed through [`parse_file`](crate::parse_file) or
//! [`MapParser`](crate::MapParser) the error is wrapped in [`Error::File`],
//! which renders the diagnostic line consumers print:
//!
//! ```text
//! Error parsing map file "level.map" (Line 3): key "a" is already defined in this table
//! ```
//!
//! ## Error Categories
//!
//! - **I/O**: the file could not be opened or read
//! - **Structural**: malformed headers, missing separators, elements outside a
//!   table, duplicate tables or keys
//! - **Value**: unrecognized values, malformed numbers, multi-line strings
//! - **Unterminated**: end of input reached while a value was still open
//! - **Lookup**: typed queries against a parsed document
//!
//! ## Examples
//!
//! ```rust
//! use mapparser::{parse_str, ErrorKind};
//!
//! let err = parse_str("[T]\na : 1\na : 2").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Structural);
//! assert_eq!(err.line(), Some(3));
//! ```

use crate::value::ValueKind;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The source could not be opened or read.
    Io,
    /// Headers, separators, table placement and uniqueness.
    Structural,
    /// A value that does not classify as any of the six types.
    Value,
    /// Input ended while a string, list or table was still open.
    Unterminated,
    /// A query against a parsed document failed.
    Lookup,
    /// Free-form message, usually from serde.
    Custom,
}

/// Represents all possible errors produced while parsing or querying a map document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The file could not be opened or read.
    #[error("Error reading map file \"{}\": {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// A parse error located in a named file.
    #[error("Error parsing map file \"{}\" (Line {line}): {source}", .path.display())]
    File {
        path: PathBuf,
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid table header: {msg}")]
    MalformedHeader { line: usize, msg: String },

    #[error("elements must be `<key> : <value>`")]
    MissingSeparator { line: usize },

    #[error("element \"{key}\" defined outside of a table")]
    OutsideTable { line: usize, key: String },

    #[error("table \"{name}\" is already defined")]
    DuplicateTable { line: usize, name: String },

    #[error("key \"{key}\" is already defined in this table")]
    DuplicateKey { line: usize, key: String },

    #[error("value not recognized: `{value}`")]
    UnrecognizedValue { line: usize, value: String },

    #[error("malformed number `{value}`")]
    InvalidNumber { line: usize, value: String },

    /// An empty fragment where a value was expected, usually a trailing comma.
    #[error("missing value (trailing comma?)")]
    EmptyValue { line: usize },

    #[error("strings must be single line")]
    MultilineString { line: usize },

    #[error("unterminated string")]
    UnterminatedString { line: usize },

    #[error("unterminated value: missing closing `{expected}`")]
    UnterminatedValue { line: usize, expected: char },

    /// Input ended while the element was still waiting for its value.
    #[error("unterminated value: input ended before a value was given")]
    MissingValue { line: usize },

    #[error("value nested more than {limit} levels deep")]
    TooDeep { line: usize, limit: usize },

    #[error("unexpected characters after value: `{rest}`")]
    TrailingCharacters { line: usize, rest: String },

    #[error("table \"{name}\" not found")]
    MissingTable { name: String },

    #[error("key \"{key}\" not found in table \"{table}\"")]
    MissingKey { table: String, key: String },

    #[error("key \"{key}\": expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapparser::Error;
    ///
    /// let err = Error::custom("grid is empty");
    /// assert_eq!(err.to_string(), "grid is empty");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Attaches a file path to a parse error. I/O errors and errors without a
    /// line are returned unchanged.
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self.line() {
            Some(line) if !matches!(self, Error::File { .. }) => Error::File {
                path: path.into(),
                line,
                source: Box::new(self),
            },
            _ => self,
        }
    }

    /// The category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::File { source, .. } => source.kind(),
            Error::MalformedHeader { .. }
            | Error::MissingSeparator { .. }
            | Error::OutsideTable { .. }
            | Error::DuplicateTable { .. }
            | Error::DuplicateKey { .. } => ErrorKind::Structural,
            Error::UnrecognizedValue { .. }
            | Error::InvalidNumber { .. }
            | Error::EmptyValue { .. }
            | Error::MultilineString { .. }
            | Error::TrailingCharacters { .. }
            | Error::TooDeep { .. } => ErrorKind::Value,
            Error::UnterminatedString { .. }
            | Error::UnterminatedValue { .. }
            | Error::MissingValue { .. } => ErrorKind::Unterminated,
            Error::MissingTable { .. } | Error::MissingKey { .. } | Error::TypeMismatch { .. } => {
                ErrorKind::Lookup
            }
            Error::Custom(_) => ErrorKind::Custom,
        }
    }

    /// The 1-based source line the error was detected on, if it came from parsing.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::File { line, .. }
            | Error::MalformedHeader { line, .. }
            | Error::MissingSeparator { line }
            | Error::OutsideTable { line, .. }
            | Error::DuplicateTable { line, .. }
            | Error::DuplicateKey { line, .. }
            | Error::UnrecognizedValue { line, .. }
            | Error::InvalidNumber { line, .. }
            | Error::EmptyValue { line }
            | Error::MultilineString { line }
            | Error::UnterminatedString { line }
            | Error::UnterminatedValue { line, .. }
            | Error::MissingValue { line }
            | Error::TooDeep { line, .. }
            | Error::TrailingCharacters { line, .. } => Some(*line),
            Error::Io { .. }
            | Error::MissingTable { .. }
            | Error::MissingKey { .. }
            | Error::TypeMismatch { .. }
            | Error::Custom(_) => None,
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_message() {
        let err = Error::DuplicateKey {
            line: 3,
            key: "a".to_string(),
        }
        .in_file("maps/level.map");

        assert_eq!(
            err.to_string(),
            "Error parsing map file \"maps/level.map\" (Line 3): key \"a\" is already defined in this table"
        );
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_in_file_is_not_nested() {
        let err = Error::MissingSeparator { line: 7 }
            .in_file("a.map")
            .in_file("b.map");

        match err {
            Error::File { path, source, .. } => {
                assert_eq!(path, PathBuf::from("a.map"));
                assert_eq!(*source, Error::MissingSeparator { line: 7 });
            }
            other => panic!("Expected file error, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_errors_have_no_line() {
        let err = Error::TypeMismatch {
            key: "rows".to_string(),
            expected: ValueKind::Int,
            found: ValueKind::String,
        };
        assert_eq!(err.line(), None);
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert_eq!(err.to_string(), "key \"rows\": expected int, found string");

        // no line, so no file wrapper either
        let wrapped = err.clone().in_file("x.map");
        assert_eq!(wrapped, err);
    }

    #[test]
    fn test_unterminated_kind() {
        let err = Error::UnterminatedValue {
            line: 2,
            expected: ']',
        };
        assert_eq!(err.kind(), ErrorKind::Unterminated);
        assert!(err.to_string().contains("missing closing `]`"));

        let err = Error::MissingValue { line: 4 };
        assert_eq!(err.kind(), ErrorKind::Unterminated);
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_too_deep_is_a_value_error() {
        let err = Error::TooDeep { line: 9, limit: 128 };
        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(err.line(), Some(9));
        assert_eq!(err.to_string(), "value nested more than 128 levels deep");
    }
}
