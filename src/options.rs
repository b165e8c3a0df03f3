//! Configuration options for parsing.
//!
//! ## Examples
//!
//! ```rust
//! use mapparser::{parse_str_with_options, ParseOptions, TrailingCommas};
//!
//! let options = ParseOptions::new().with_trailing_commas(TrailingCommas::Allow);
//! let doc = parse_str_with_options("[T]\nxs : [1, 2,]", &options).unwrap();
//! assert_eq!(doc.get("T", "xs").and_then(|v| v.as_list()).map(|l| l.len()), Some(2));
//! ```

/// What to do with a comma directly before a closing `]` or `}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrailingCommas {
    /// `[1, 2,]` is an error: the empty fragment after the comma is not a value.
    #[default]
    Reject,
    /// A single trailing comma is ignored.
    Allow,
}

/// Configuration options for parsing map files.
///
/// # Examples
///
/// ```rust
/// use mapparser::{ParseOptions, TrailingCommas};
///
/// let options = ParseOptions::default();
/// assert_eq!(options.trailing_commas, TrailingCommas::Reject);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ParseOptions {
    pub trailing_commas: TrailingCommas,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trailing_commas(mut self, policy: TrailingCommas) -> Self {
        self.trailing_commas = policy;
        self
    }

    pub(crate) fn allows_trailing_comma(&self) -> bool {
        self.trailing_commas == TrailingCommas::Allow
    }
}
