//! Collapsing unchanged structural context around a diff.
//!
//! When a paired line differs deep inside an otherwise-identical struct
//! or map literal, repeating the whole literal on both sides drowns the
//! change. `compact` collapses the unchanged context to
//! `%Name{..., key: value}`; when that does not apply,
//! `mask_other_structs` bounds output size by replacing unrelated struct
//! literals with a `%Name{...}` placeholder.

use std::ops::Range;

use termdiff_core::{DiffSegment, SemanticColor, Styled};

use crate::scan::{self, DelimScanner};

/// Collapse the context around a diff region to `%Name{..., key: value}`
/// form, highlighted diff region included.
///
/// The struct detector is tried first, then the bare map detector:
/// the prefix must currently sit inside an open `%Name{` (or `%{`)
/// marker and end in a key marker. The display name is taken from the
/// first struct marker in the original (untruncated) expected text.
/// Returns `None` when neither detector applies; the caller keeps the
/// verbose rendering.
pub fn compact(
    prefix: &str,
    expected_full: &str,
    segment: &DiffSegment,
) -> Option<(Styled, Styled)> {
    let open = innermost_open_brace(prefix)?;
    let head = &prefix[..open];

    let name = if head.ends_with('%') {
        None
    } else {
        let local = struct_name_at(head)?;
        Some(first_struct_name(expected_full).unwrap_or(local))
    };

    let tail = key_tail(&prefix[open + 1..])?;

    // the unchanged remainder of the value under the cursor
    let rest_len = scan::value_end(&segment.expected_suffix);
    let value_rest = &segment.expected_suffix[..rest_len];

    let build = |diff: &str| {
        let mut styled = Styled::plain(match &name {
            Some(name) => format!("%{name}{{..., "),
            None => "%{..., ".to_string(),
        });
        styled.push_plain(tail);
        styled.push_colored(diff, SemanticColor::Highlight);
        styled.push_plain(value_rest);
        styled.push_plain("}");
        styled
    };

    Some((build(&segment.expected_diff), build(&segment.actual_diff)))
}

/// Byte offset of the innermost `{` still open at the end of `prefix`.
fn innermost_open_brace(prefix: &str) -> Option<usize> {
    let mut stack = Vec::new();
    let mut scanner = DelimScanner::new();
    let mut i = 0;
    while i < prefix.len() {
        if !scanner.in_quote() {
            match prefix[i..].chars().next() {
                Some('{') => stack.push(i),
                Some('}') => {
                    stack.pop();
                }
                _ => {}
            }
        }
        i += scanner.step(prefix, i);
    }
    stack.pop()
}

/// The struct name when `head` ends with a `%Name` marker.
fn struct_name_at(head: &str) -> Option<String> {
    let name_start = head.rfind('%')?;
    let name = &head[name_start + 1..];
    let valid = !name.is_empty()
        && name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    valid.then(|| name.to_string())
}

/// Name of the first struct literal anywhere in `text`.
fn first_struct_name(text: &str) -> Option<String> {
    let span = scan::struct_spans(text).into_iter().next()?;
    Some(text[span.range.start + 1..span.brace].to_string())
}

/// The `key => ` / `key: ` tail of the entry the prefix stops inside,
/// or `None` when the prefix does not end in a key marker.
fn key_tail(inner: &str) -> Option<&str> {
    let mut scanner = DelimScanner::new();
    let mut start = 0;
    let mut i = 0;
    while i < inner.len() {
        if scanner.at_top_level() && inner[i..].starts_with(',') {
            start = i + 1;
        }
        i += scanner.step(inner, i);
    }

    let tail = inner[start..].trim_start();
    let trimmed = tail.trim_end();
    let key = trimmed
        .strip_suffix("=>")
        .map(str::trim_end)
        .or_else(|| trimmed.strip_suffix(':'))?;
    (!key.is_empty()).then_some(tail)
}

/// Rebuild `line` with every struct literal that does not overlap the
/// diff `region` masked to `%Name{...}`, the region itself highlighted.
///
/// Struct literals that do overlap the region are kept, but their
/// contents are masked recursively.
pub fn mask_other_structs(line: &str, region: Range<usize>) -> Styled {
    let mut styled = Styled::default();
    mask_into(&mut styled, line, 0, &region);
    styled
}

fn mask_into(styled: &mut Styled, text: &str, base: usize, region: &Range<usize>) {
    let mut cursor = 0;
    for span in scan::struct_spans(text) {
        push_region_aware(styled, &text[cursor..span.range.start], base + cursor, region);

        let abs_start = base + span.range.start;
        let abs_end = base + span.range.end;
        if abs_end <= region.start || abs_start >= region.end {
            styled.push_plain(&text[span.range.start..=span.brace]);
            styled.push_plain("...}");
        } else {
            push_region_aware(
                styled,
                &text[span.range.start..=span.brace],
                abs_start,
                region,
            );
            mask_into(
                styled,
                &text[span.brace + 1..span.range.end - 1],
                base + span.brace + 1,
                region,
            );
            push_region_aware(styled, "}", abs_end - 1, region);
        }
        cursor = span.range.end;
    }
    push_region_aware(styled, &text[cursor..], base + cursor, region);
}

/// Push `text` (located at `base` in line coordinates), highlighting the
/// part that falls inside `region`.
fn push_region_aware(styled: &mut Styled, text: &str, base: usize, region: &Range<usize>) {
    let end = base + text.len();
    let hl_start = region.start.clamp(base, end) - base;
    let hl_end = region.end.clamp(base, end) - base;
    if hl_start >= hl_end {
        styled.push_plain(text);
        return;
    }
    styled.push_plain(&text[..hl_start]);
    styled.push_colored(&text[hl_start..hl_end], SemanticColor::Highlight);
    styled.push_plain(&text[hl_end..]);
}
