//! Delimiter-aware scanning of term text.
//!
//! A small explicit state machine over token kinds, rather than
//! backtracking regexes: the scanner keeps independent depth counters for
//! `()`, `[]`, `{}`, and `<<`/`>>` binary literals, plus a double-quote
//! state with backslash escapes. ANSI SGR sequences embedded in input
//! text are consumed whole and never affect any counter.

use std::ops::Range;

/// Tracks nesting state while scanning a single line of term text.
#[derive(Clone, Debug, Default)]
pub struct DelimScanner {
    paren: u32,
    bracket: u32,
    brace: u32,
    binary: u32,
    quote: bool,
    escaped: bool,
}

impl DelimScanner {
    /// Create a scanner at top level.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the scanner sits outside every bracket pair, binary
    /// literal, and quoted string.
    pub const fn at_top_level(&self) -> bool {
        self.paren == 0 && self.bracket == 0 && self.brace == 0 && self.binary == 0 && !self.quote
    }

    /// True while inside a double-quoted string.
    pub const fn in_quote(&self) -> bool {
        self.quote
    }

    /// True while inside a `<<`/`>>` binary literal.
    pub const fn in_binary(&self) -> bool {
        self.binary > 0
    }

    /// Consume the token starting at byte `i`, returning its byte length.
    ///
    /// Tokens are single characters except for `<<`, `>>`, and ANSI SGR
    /// sequences. Closers below depth zero saturate rather than underflow,
    /// so malformed input can never panic the scan.
    pub fn step(&mut self, text: &str, i: usize) -> usize {
        let rest = &text[i..];
        let c = match rest.chars().next() {
            Some(c) => c,
            None => return 0,
        };

        if self.quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.quote = false;
            }
            return c.len_utf8();
        }

        if c == '\x1b' {
            if let Some(params) = rest.strip_prefix("\x1b[") {
                let mut len = 2;
                for c in params.chars() {
                    len += c.len_utf8();
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
                return len;
            }
            return c.len_utf8();
        }

        if rest.starts_with("<<") {
            self.binary += 1;
            return 2;
        }
        if rest.starts_with(">>") {
            self.binary = self.binary.saturating_sub(1);
            return 2;
        }

        match c {
            '"' => self.quote = true,
            '(' => self.paren += 1,
            ')' => self.paren = self.paren.saturating_sub(1),
            '[' => self.bracket += 1,
            ']' => self.bracket = self.bracket.saturating_sub(1),
            '{' => self.brace += 1,
            '}' => self.brace = self.brace.saturating_sub(1),
            _ => {}
        }
        c.len_utf8()
    }
}

/// Split `text` on every top-level occurrence of `sep`.
///
/// A separator only splits when all depth counters are zero and the
/// scanner is outside quotes and binaries. Parts are not trimmed.
pub fn split_top_level(text: &str, sep: &str) -> Vec<String> {
    split_ranges(text, sep)
        .into_iter()
        .map(|range| text[range].to_string())
        .collect()
}

/// Byte ranges of the parts `split_top_level` would produce.
pub(crate) fn split_ranges(text: &str, sep: &str) -> Vec<Range<usize>> {
    let mut parts = Vec::new();
    let mut scanner = DelimScanner::new();
    let mut start = 0;
    let mut i = 0;
    while i < text.len() {
        if scanner.at_top_level() && text[i..].starts_with(sep) {
            parts.push(start..i);
            i += sep.len();
            start = i;
        } else {
            i += scanner.step(text, i);
        }
    }
    parts.push(start..text.len());
    parts
}

/// Byte offset of the first top-level occurrence of `sep`.
pub fn find_top_level(text: &str, sep: &str) -> Option<usize> {
    let mut scanner = DelimScanner::new();
    let mut i = 0;
    while i < text.len() {
        if scanner.at_top_level() && text[i..].starts_with(sep) {
            return Some(i);
        }
        i += scanner.step(text, i);
    }
    None
}

/// Byte offset of the delimiter closing the `(`/`[`/`{` that `text`
/// starts with, or `None` when `text` opens differently or never closes.
pub fn matching_close(text: &str) -> Option<usize> {
    let open = text.chars().next()?;
    if !matches!(open, '(' | '[' | '{') {
        return None;
    }

    let counter = |scanner: &DelimScanner| match open {
        '(' => scanner.paren,
        '[' => scanner.bracket,
        _ => scanner.brace,
    };

    let mut scanner = DelimScanner::new();
    let mut i = scanner.step(text, 0);
    while i < text.len() {
        let j = i;
        i += scanner.step(text, j);
        if counter(&scanner) == 0 {
            return Some(j);
        }
    }
    None
}

/// Byte length of the leading value in `text`: everything up to the first
/// top-level comma or closing delimiter.
pub(crate) fn value_end(text: &str) -> usize {
    let mut scanner = DelimScanner::new();
    let mut i = 0;
    while i < text.len() {
        if scanner.at_top_level() {
            let rest = &text[i..];
            if rest.starts_with(',')
                || rest.starts_with('}')
                || rest.starts_with(']')
                || rest.starts_with(')')
                || rest.starts_with(">>")
            {
                return i;
            }
        }
        i += scanner.step(text, i);
    }
    text.len()
}

/// Byte offset of the `{` when `text` starts with a map or struct marker
/// (`%{` or `%Name{`), or `None`.
pub(crate) fn map_marker_len(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('%')?;
    if rest.starts_with('{') {
        return Some(1);
    }
    struct_marker_len(text)
}

/// Byte offset of the `{` when `text` starts with a struct marker
/// (`%Name{` with an uppercase-led module path), or `None`.
pub(crate) fn struct_marker_len(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('%')?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    let mut len = 1 + first.len_utf8();
    for c in chars {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            len += c.len_utf8();
        } else if c == '{' {
            return Some(len);
        } else {
            return None;
        }
    }
    None
}

/// A struct literal located within a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StructSpan {
    /// Byte range of the whole literal, marker through closing brace
    pub range: Range<usize>,
    /// Absolute byte offset of the opening `{`
    pub brace: usize,
}

/// Outermost struct literal spans anywhere in `text`, in order.
///
/// Bare maps (`%{`) are not included; only named struct literals.
pub(crate) fn struct_spans(text: &str) -> Vec<StructSpan> {
    let mut spans = Vec::new();
    let mut scanner = DelimScanner::new();
    let mut i = 0;
    while i < text.len() {
        if !scanner.in_quote()
            && let Some(brace) = struct_marker_len(&text[i..])
            && let Some(close) = matching_close(&text[i + brace..])
        {
            let end = i + brace + close + 1;
            spans.push(StructSpan {
                range: i..end,
                brace: i + brace,
            });
            i = end;
            continue;
        }
        i += scanner.step(text, i);
    }
    spans
}

/// Byte offset of the keyword-style `:` separating key from value in a
/// map entry (`key: value`), or `None`.
///
/// The colon must sit at top level, directly follow a key character, and
/// be followed by whitespace, which keeps leading atoms (`:ok`) inert.
pub(crate) fn keyword_colon_pos(entry: &str) -> Option<usize> {
    let mut scanner = DelimScanner::new();
    let mut i = 0;
    while i < entry.len() {
        if i > 0 && scanner.at_top_level() && entry[i..].starts_with(':') {
            let follows = entry[i + 1..].chars().next();
            let precedes = entry[..i].chars().next_back();
            if follows.is_some_and(char::is_whitespace) && precedes.is_some_and(is_key_char) {
                return Some(i);
            }
        }
        i += scanner.step(entry, i);
    }
    None
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '?' || c == '!' || c == '"'
}
