//! Term text normalization.
//!
//! Converts a raw term value (absent, text, or a byte sequence) into
//! display lines, interpreting binary-literal syntax and an optional
//! injected pretty-printer. Never errors: a failing printer is swallowed
//! and the original text kept, unrecognized byte literals pass through
//! unchanged.

use std::error::Error;
use std::fmt;

use crate::scan::DelimScanner;

/// Raw input for one side of a diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermInput {
    /// No value was reported; normalizes to an empty line sequence
    Absent,
    /// Already-stringified term text
    Text(String),
    /// A byte sequence, decoded as UTF-8 (lossily)
    Bytes(Vec<u8>),
}

impl From<&str> for TermInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TermInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<u8>> for TermInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl<T: Into<TermInput>> From<Option<T>> for TermInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Error reported by an injected [`TermPrinter`].
///
/// Only ever logged: normalization falls back to the unprinted text.
#[derive(Clone, Debug)]
pub struct PrintError {
    message: String,
}

impl PrintError {
    /// Create a print error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pretty-printing failed: {}", self.message)
    }
}

impl Error for PrintError {}

/// An injected pretty-printing capability.
///
/// The engine itself never reformats term text beyond literal rewriting;
/// callers that can reach a real formatter inject it here.
pub trait TermPrinter {
    /// Pretty-print already-stringified term text.
    ///
    /// # Errors
    ///
    /// Implementations may fail on text they cannot reformat; the
    /// normalizer swallows the error and keeps the original text.
    fn pretty_print(&self, source: &str) -> Result<String, PrintError>;
}

/// The default printer: returns its input unchanged, never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityPrinter;

impl TermPrinter for IdentityPrinter {
    fn pretty_print(&self, source: &str) -> Result<String, PrintError> {
        Ok(source.to_string())
    }
}

/// Normalize a raw term into display lines using the identity printer.
pub fn normalize(input: impl Into<TermInput>) -> Vec<String> {
    normalize_with(input, &IdentityPrinter)
}

/// Normalize a raw term into display lines.
///
/// The result is newline-split and right-trimmed. Two literal-rewriting
/// passes run after pretty-printing: printable comma-separated byte-list
/// binaries become quoted string literals, and remaining bit-size
/// placeholder binaries are quoted into atomic leaves.
pub fn normalize_with(input: impl Into<TermInput>, printer: &dyn TermPrinter) -> Vec<String> {
    let text = match input.into() {
        TermInput::Absent => return Vec::new(),
        TermInput::Text(text) => text,
        TermInput::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    };

    let text = match printer.pretty_print(&text) {
        Ok(pretty) => pretty,
        Err(err) => {
            log::debug!("keeping unprinted term text: {err}");
            text
        }
    };

    let text = rewrite_binaries(&text, decode_byte_list);
    let text = rewrite_binaries(&text, quote_bit_placeholder);

    text.lines().map(|line| line.trim_end().to_string()).collect()
}

/// Walk `text` and offer every binary literal outside quotes to
/// `rewrite`; spans it declines are copied through verbatim.
fn rewrite_binaries(text: &str, rewrite: impl Fn(&str, &str) -> Option<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut scanner = DelimScanner::new();
    let mut i = 0;
    while i < text.len() {
        if !scanner.in_quote()
            && text[i..].starts_with("<<")
            && let Some(close) = binary_close(&text[i..])
        {
            let span = &text[i..i + close + 2];
            let inner = &span[2..span.len() - 2];
            match rewrite(inner, span) {
                Some(replacement) => out.push_str(&replacement),
                None => out.push_str(span),
            }
            // the span is balanced, so skipping it leaves the scanner
            // state exactly as stepping through would
            i += span.len();
            continue;
        }
        let len = scanner.step(text, i);
        out.push_str(&text[i..i + len]);
        i += len;
    }
    out
}

/// Byte offset of the `>>` closing the `<<` that `text` starts with.
fn binary_close(text: &str) -> Option<usize> {
    let mut scanner = DelimScanner::new();
    let mut i = scanner.step(text, 0);
    while i < text.len() {
        let j = i;
        i += scanner.step(text, j);
        if !scanner.in_binary() {
            return Some(j);
        }
    }
    None
}

/// `<<104, 105>>` → `"hi"` when every token is a byte and the bytes form
/// printable UTF-8.
fn decode_byte_list(inner: &str, _span: &str) -> Option<String> {
    let mut bytes = Vec::new();
    if !inner.trim().is_empty() {
        for token in inner.split(',') {
            bytes.push(token.trim().parse::<u8>().ok()?);
        }
    }
    let decoded = String::from_utf8(bytes).ok()?;
    if decoded.chars().any(char::is_control) {
        return None;
    }
    Some(format!("{decoded:?}"))
}

/// `<<_ :: 32>>` → `"<<_ :: 32>>"`, so later stages treat the
/// placeholder as an atomic leaf.
fn quote_bit_placeholder(inner: &str, span: &str) -> Option<String> {
    let rest = inner.trim().strip_prefix('_')?;
    let size = rest.trim_start().strip_prefix("::")?;
    if size.trim().is_empty() {
        return None;
    }
    Some(format!("{span:?}"))
}
