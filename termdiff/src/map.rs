//! Map literal parsing and key-wise alignment.
//!
//! `parse_map` recognizes single-line map (`%{…}`) and struct
//! (`%Name{…}`) literals; `align` matches two such literals entry by
//! entry so the engine can diff by key instead of by position. Failure is
//! signalled with [`NotAMap`], which only ever routes the engine to its
//! Myers fallback.

use std::error::Error;
use std::fmt;

use crate::scan;

/// Key/value separator style of a single map entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySep {
    /// `key => value`
    Arrow,
    /// `key: value` keyword shorthand
    Keyword,
}

impl KeySep {
    /// Render a key and value back into entry text.
    pub fn entry(self, key: &str, value: &str) -> String {
        match self {
            Self::Arrow => format!("{key} => {value}"),
            Self::Keyword => format!("{key}: {value}"),
        }
    }
}

/// One `{key, value}` pair extracted from a nesting level.
///
/// Ordering of entries is first-seen order in the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapEntry {
    /// The key text, trimmed
    pub key: String,
    /// The separator the source used for this entry
    pub sep: KeySep,
    /// The value text, trimmed
    pub value: String,
}

/// A parsed single-line map or struct literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapLiteral {
    /// The struct type name, `None` for a bare map
    pub name: Option<String>,
    /// The entries in source order, continuation markers dropped
    pub entries: Vec<MapEntry>,
}

impl MapLiteral {
    /// True when the literal carries a struct type name.
    pub const fn is_struct(&self) -> bool {
        self.name.is_some()
    }

    /// Rejoin the entries between the literal markers.
    ///
    /// Recovers the source nesting level's text up to whitespace.
    pub fn rejoin(&self) -> String {
        let entries: Vec<String> = self
            .entries
            .iter()
            .map(|entry| entry.sep.entry(&entry.key, &entry.value))
            .collect();
        format!(
            "%{}{{{}}}",
            self.name.as_deref().unwrap_or(""),
            entries.join(", ")
        )
    }
}

/// Marker error: the text is not a single-line map literal.
///
/// Internal to the engine: it triggers the Myers fallback and is never
/// surfaced to callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NotAMap;

impl fmt::Display for NotAMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a map literal")
    }
}

impl Error for NotAMap {}

/// Parse a single-line map or struct literal into ordered entries.
///
/// One layer of surrounding parentheses is unwrapped first. A bare `...`
/// continuation entry is dropped; an entry without a top-level key/value
/// separator fails the parse.
///
/// # Errors
///
/// Returns [`NotAMap`] when the text is not a well-formed map literal.
pub fn parse_map(text: &str) -> Result<MapLiteral, NotAMap> {
    let mut t = text.trim();

    if t.starts_with('(') && scan::matching_close(t) == Some(t.len() - 1) {
        t = t[1..t.len() - 1].trim();
    }

    let open = scan::map_marker_len(t).ok_or(NotAMap)?;
    if !t.ends_with('}') || scan::matching_close(&t[open..]) != Some(t.len() - 1 - open) {
        return Err(NotAMap);
    }

    let name = (open > 1).then(|| t[1..open].to_string());
    let inner = &t[open + 1..t.len() - 1];

    let mut entries = Vec::new();
    for part in scan::split_top_level(inner, ",") {
        let part = part.trim();
        if part.is_empty() || part == "..." {
            continue;
        }
        entries.push(parse_entry(part).ok_or(NotAMap)?);
    }

    Ok(MapLiteral { name, entries })
}

fn parse_entry(entry: &str) -> Option<MapEntry> {
    let (sep, key_end, value_start) = match scan::find_top_level(entry, "=>") {
        Some(idx) => (KeySep::Arrow, idx, idx + 2),
        None => {
            let idx = scan::keyword_colon_pos(entry)?;
            (KeySep::Keyword, idx, idx + 1)
        }
    };

    let key = entry[..key_end].trim();
    let value = entry[value_start..].trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some(MapEntry {
        key: key.to_string(),
        sep,
        value: value.to_string(),
    })
}

/// One aligned row of two maps' entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedEntry {
    /// The key both sides are matched on
    pub key: String,
    /// Separator style (expected side's wins when both are present)
    pub sep: KeySep,
    /// The expected side's value, if the key exists there
    pub expected: Option<String>,
    /// The actual side's value, if the key exists there
    pub actual: Option<String>,
}

/// Align two map literals entry by entry.
///
/// Row order is the expected side's key order followed by actual-only
/// keys in the actual side's order. Literals whose type names differ do
/// not align: the changed marker is a real difference, and the line
/// diff's character-level pairing highlights it.
///
/// # Errors
///
/// Returns [`NotAMap`] when either side fails [`parse_map`] or the type
/// names differ; the engine then falls back to the Myers line diff.
pub fn align(expected: &str, actual: &str) -> Result<Vec<AlignedEntry>, NotAMap> {
    let expected = parse_map(expected)?;
    let actual = parse_map(actual)?;
    if expected.name != actual.name {
        return Err(NotAMap);
    }

    let mut rows: Vec<AlignedEntry> = expected
        .entries
        .into_iter()
        .map(|entry| AlignedEntry {
            key: entry.key,
            sep: entry.sep,
            expected: Some(entry.value),
            actual: None,
        })
        .collect();

    for entry in actual.entries {
        if let Some(row) = rows.iter_mut().find(|row| row.key == entry.key) {
            row.actual = Some(entry.value);
        } else {
            rows.push(AlignedEntry {
                key: entry.key,
                sep: entry.sep,
                expected: None,
                actual: Some(entry.value),
            });
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_map() {
        let literal = parse_map("%{a: 1, b: 2}").unwrap();
        assert_eq!(literal.name, None);
        assert_eq!(literal.entries.len(), 2);
        assert_eq!(literal.entries[0].key, "a");
        assert_eq!(literal.entries[0].value, "1");
        assert_eq!(literal.entries[1].sep, KeySep::Keyword);
    }

    #[test]
    fn test_parse_struct_literal() {
        let literal = parse_map("%User{name => \"anna\", age => 30}").unwrap();
        assert_eq!(literal.name.as_deref(), Some("User"));
        assert_eq!(literal.entries[0].sep, KeySep::Arrow);
        assert_eq!(literal.entries[0].value, "\"anna\"");
    }

    #[test]
    fn test_parse_unwraps_one_paren_layer() {
        let literal = parse_map("(%{a: 1})").unwrap();
        assert_eq!(literal.entries.len(), 1);
    }

    #[test]
    fn test_continuation_marker_dropped() {
        let literal = parse_map("%{a: 1, ...}").unwrap();
        assert_eq!(literal.entries.len(), 1);
    }

    #[test]
    fn test_nested_values_stay_whole() {
        let literal = parse_map("%{a: %{b: 1, c: 2}, d: [1, 2]}").unwrap();
        assert_eq!(literal.entries.len(), 2);
        assert_eq!(literal.entries[0].value, "%{b: 1, c: 2}");
        assert_eq!(literal.entries[1].value, "[1, 2]");
    }

    #[test]
    fn test_rejects_non_maps() {
        assert_eq!(parse_map("{1, 2}"), Err(NotAMap));
        assert_eq!(parse_map("[1, 2]"), Err(NotAMap));
        assert_eq!(parse_map("%{a: 1} :: extra"), Err(NotAMap));
        assert_eq!(parse_map("%{1, 2}"), Err(NotAMap));
    }

    #[test]
    fn test_rejoin_roundtrip() {
        for text in ["%{a: 1, b: 2}", "%User{a => :ok, b: [1, 2]}", "%{}"] {
            assert_eq!(parse_map(text).unwrap().rejoin(), text);
        }
    }

    #[test]
    fn test_align_orders_keys() {
        let rows = align("%{a: 1, b: 2}", "%{c: 3, a: 1}").unwrap();
        let keys: Vec<&str> = rows.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(rows[1].actual, None);
        assert_eq!(rows[2].expected, None);
    }

    #[test]
    fn test_align_fails_on_non_map_side() {
        assert_eq!(align("%{a: 1}", "[1]"), Err(NotAMap));
    }

    #[test]
    fn test_align_fails_on_type_name_mismatch() {
        assert_eq!(align("%Foo{a: 1}", "%Bar{a: 1}"), Err(NotAMap));
        assert_eq!(align("%User{a: 1}", "%{a: 1}"), Err(NotAMap));
        assert!(align("%User{a: 1}", "%User{a: 2}").is_ok());
    }
}
