//! Nesting-aware text scanning shared by the line assembler and the value parser.
//!
//! Every structural decision in the format (is this `#` a comment, is this `:`
//! the key separator, is this `,` between list items, is the value finished)
//! depends on the same three pieces of state: bracket depth, brace depth and
//! whether we are inside a quoted string. [`Nesting`] tracks them one
//! character at a time.
//!
//! Inside strings a backslash escapes the next character, so `\"` never ends
//! a string.

/// Running delimiter state over a stretch of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Nesting {
    brackets: i64,
    braces: i64,
    in_string: bool,
    escaped: bool,
}

impl Nesting {
    /// Returns the state after feeding all of `text` into a fresh tracker.
    pub(crate) fn scan(text: &str) -> Self {
        let mut nesting = Nesting::default();
        for ch in text.chars() {
            nesting.feed(ch);
        }
        nesting
    }

    pub(crate) fn feed(&mut self, ch: char) {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if ch == '\\' {
                self.escaped = true;
            } else if ch == '"' {
                self.in_string = false;
            }
            return;
        }

        match ch {
            '"' => self.in_string = true,
            '[' => self.brackets += 1,
            ']' => self.brackets -= 1,
            '{' => self.braces += 1,
            '}' => self.braces -= 1,
            _ => {}
        }
    }

    /// True at depth zero outside any string: the only place delimiters count.
    pub(crate) fn is_outside(&self) -> bool {
        self.brackets == 0 && self.braces == 0 && !self.in_string
    }

    /// True while a string, list or table opened in the text is still waiting
    /// for its closing delimiter.
    pub(crate) fn is_open(&self) -> bool {
        self.in_string || self.brackets > 0 || self.braces > 0
    }

    pub(crate) fn in_string(&self) -> bool {
        self.in_string
    }

    /// The closing delimiter still owed, innermost kind first by convention
    /// (`]` before `}` when both are open).
    pub(crate) fn expected_closer(&self) -> Option<char> {
        if self.brackets > 0 {
            Some(']')
        } else if self.braces > 0 {
            Some('}')
        } else {
            None
        }
    }
}

/// Cuts a trailing `#` comment off `line`, continuing from `nesting`.
///
/// A `#` only starts a comment when it sits outside every string, list and
/// table. `nesting` is advanced over the kept part so callers assembling a
/// multi-line value can carry it into the next line.
pub(crate) fn strip_comment<'a>(line: &'a str, nesting: &mut Nesting) -> &'a str {
    for (i, ch) in line.char_indices() {
        if ch == '#' && nesting.is_outside() {
            return &line[..i];
        }
        nesting.feed(ch);
    }
    line
}

/// Finds the byte offset of the first top-level occurrence of `delim`.
fn find_top_level(text: &str, delim: char) -> Option<usize> {
    let mut nesting = Nesting::default();
    for (i, ch) in text.char_indices() {
        if ch == delim && nesting.is_outside() {
            return Some(i);
        }
        nesting.feed(ch);
    }
    None
}

/// Splits `key : value` at the first top-level colon, trimming both halves.
///
/// ```text
/// pos : [1, 2]           -> ("pos", "[1, 2]")
/// label : "a:b"          -> ("label", "\"a:b\"")
/// box : { w: 1 }         -> ("box", "{ w: 1 }")
/// ```
pub(crate) fn split_key_value(text: &str) -> Option<(&str, &str)> {
    let at = find_top_level(text, ':')?;
    Some((text[..at].trim(), text[at + 1..].trim()))
}

/// Splits `text` at every top-level comma, trimming each fragment.
///
/// The result always has at least one fragment; an empty input yields one
/// empty fragment.
pub(crate) fn split_top_level(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut nesting = Nesting::default();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if ch == ',' && nesting.is_outside() {
            fragments.push(text[start..i].trim());
            start = i + 1;
        }
        nesting.feed(ch);
    }
    fragments.push(text[start..].trim());
    fragments
}

/// Given text starting with `open`, returns the byte offset of the delimiter
/// that brings its depth back to zero. Delimiters inside strings are ignored.
pub(crate) fn find_matching(text: &str, open: char, close: char) -> Option<usize> {
    let mut depth: i64 = 0;
    let mut nesting = Nesting::default();

    for (i, ch) in text.char_indices() {
        let in_string = nesting.in_string();
        nesting.feed(ch);
        if in_string || nesting.in_string() {
            continue;
        }
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment_plain() {
        let mut nesting = Nesting::default();
        assert_eq!(strip_comment("rows : 20 # grid height", &mut nesting), "rows : 20 ");
        assert!(nesting.is_outside());
    }

    #[test]
    fn test_strip_comment_respects_strings_and_nesting() {
        let mut nesting = Nesting::default();
        assert_eq!(
            strip_comment(r##"tag : "#ff0000" # colour"##, &mut nesting),
            r##"tag : "#ff0000" "##
        );

        let mut nesting = Nesting::default();
        assert_eq!(strip_comment("xs : [1, #2]", &mut nesting), "xs : [1, #2]");
        assert_eq!(strip_comment("t : {a: #}", &mut Nesting::default()), "t : {a: #}");
    }

    #[test]
    fn test_strip_comment_carries_state_across_lines() {
        let mut nesting = Nesting::scan("[1,");
        assert!(nesting.is_open());
        assert_eq!(strip_comment("2] # done", &mut nesting), "2] ");
        assert!(!nesting.is_open());
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let nesting = Nesting::scan(r#""say \"hi\"""#);
        assert!(!nesting.is_open());

        let nesting = Nesting::scan(r#""half \""#);
        assert!(nesting.in_string());
    }

    #[test]
    fn test_split_key_value() {
        assert_eq!(split_key_value("a : 1"), Some(("a", "1")));
        assert_eq!(split_key_value(r#"a:"x:y""#), Some(("a", r#""x:y""#)));
        assert_eq!(
            split_key_value("box : { w: 1, h: 2 }"),
            Some(("box", "{ w: 1, h: 2 }"))
        );
        assert_eq!(split_key_value("a : "), Some(("a", "")));
        assert_eq!(split_key_value("no separator"), None);
        assert_eq!(split_key_value(r#""a:b""#), None);
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(split_top_level("1, 2 ,3"), vec!["1", "2", "3"]);
        assert_eq!(
            split_top_level(r#"[1, 2], "a,b", {x: 1, y: 2}"#),
            vec!["[1, 2]", r#""a,b""#, "{x: 1, y: 2}"]
        );
        assert_eq!(split_top_level("1,"), vec!["1", ""]);
        assert_eq!(split_top_level(""), vec![""]);
    }

    #[test]
    fn test_find_matching() {
        assert_eq!(find_matching("[1, [2, 3]]", '[', ']'), Some(10));
        assert_eq!(find_matching("[1] tail", '[', ']'), Some(2));
        assert_eq!(find_matching(r#"["]", 1]"#, '[', ']'), Some(7));
        assert_eq!(find_matching("{a: {b: 1}}", '{', '}'), Some(10));
        assert_eq!(find_matching("[1, 2", '[', ']'), None);
    }

    #[test]
    fn test_expected_closer() {
        assert_eq!(Nesting::scan("[1, {").expected_closer(), Some(']'));
        assert_eq!(Nesting::scan("{a: 1").expected_closer(), Some('}'));
        assert_eq!(Nesting::scan("[1]").expected_closer(), None);
    }
}
