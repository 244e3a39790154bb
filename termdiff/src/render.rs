//! Turning diff text into prefixed, colorized physical lines.
//!
//! The first physical line of an operation carries its `"- "`/`"+ "`
//! marker, continuations an equal-width blank marker. Values split
//! across physical lines by structure: outer parentheses re-attach to
//! the first/last lines, multi-entry map literals go one entry per line
//! with nested maps indented two spaces deeper. Because color lives in
//! spans rather than escape codes, splitting can never tear an escape
//! sequence apart.

use std::ops::Range;

use termdiff_core::{
    AnsiBackend, LineKind, PlainBackend, RenderedLine, SemanticColor, Styled,
};

use crate::diff::DiffOptions;
use crate::scan;

const INDENT: &str = "  ";

/// Render one delete or insert operation into marker-prefixed lines.
pub fn render(kind: LineKind, text: &Styled, opts: &DiffOptions) -> RenderedLine {
    let marker_color = match kind {
        LineKind::Del => SemanticColor::Deleted,
        LineKind::Ins => SemanticColor::Inserted,
    };
    let marker = opts.symbols.marker(kind);
    let continuation = opts.symbols.continuation(kind);

    let physical = split_styled(text);
    let mut lines = Vec::with_capacity(physical.len());
    for (i, body) in physical.iter().enumerate() {
        let mut line = Styled::default();
        if i == 0 {
            line.push_colored(marker, marker_color);
        } else {
            line.push_plain(&continuation);
        }
        line.push_styled(body);
        lines.push(if opts.color {
            line.render(&AnsiBackend::new(opts.theme))
        } else {
            line.render(&PlainBackend)
        });
    }

    RenderedLine::new(kind, lines)
}

/// Split a value into physical lines by structure.
fn split_styled(text: &Styled) -> Vec<Styled> {
    let plain = text.text();

    // parenthesized values split on the inside, parens re-attached
    if plain.starts_with('(') && scan::matching_close(plain) == Some(plain.len() - 1) {
        let mut lines = split_styled(&text.slice(1..plain.len() - 1));
        if let Some(first) = lines.first_mut() {
            let mut opened = Styled::plain("(");
            opened.push_styled(first);
            *first = opened;
        }
        if let Some(last) = lines.last_mut() {
            last.push_plain(")");
        }
        return lines;
    }

    if let Some(open) = scan::map_marker_len(plain)
        && plain.ends_with('}')
        && scan::matching_close(&plain[open..]) == Some(plain.len() - 1 - open)
    {
        let inner = open + 1..plain.len() - 1;
        let entries = entry_ranges(&plain[inner.clone()], inner.start);
        // a literal opening with the bare continuation entry is collapsed
        // context; it stays on one line
        let collapsed = entries
            .first()
            .is_some_and(|range| &plain[range.clone()] == "...");
        if entries.len() > 1 && !collapsed {
            let mut lines = vec![text.slice(0..inner.start)];
            let count = entries.len();
            for (i, range) in entries.into_iter().enumerate() {
                let mut entry_lines = split_entry(&text.slice(range));
                if i + 1 < count
                    && let Some(last) = entry_lines.last_mut()
                {
                    match trailing_color(last) {
                        Some(color) => last.push_colored(",", color),
                        None => last.push_plain(","),
                    }
                }
                for entry_line in entry_lines {
                    let mut indented = match leading_color(&entry_line) {
                        Some(color) => Styled::colored(INDENT, color),
                        None => Styled::plain(INDENT),
                    };
                    indented.push_styled(&entry_line);
                    lines.push(indented);
                }
            }
            lines.push(text.slice(inner.end..plain.len()));
            return lines;
        }
    }

    vec![text.clone()]
}

/// Color of the span ending exactly at the text's end, if any.
///
/// Synthesized line text (commas, indent) inherits this color so a
/// whole-line colored value stays uniformly colored after splitting.
fn trailing_color(styled: &Styled) -> Option<SemanticColor> {
    let span = styled.spans().last()?;
    (span.end as usize == styled.len()).then_some(span.color)
}

/// Color of the span starting at byte zero, if any.
fn leading_color(styled: &Styled) -> Option<SemanticColor> {
    let span = styled.spans().first()?;
    (span.start == 0).then_some(span.color)
}

/// Trimmed absolute byte ranges of a map body's top-level entries.
fn entry_ranges(inner: &str, base: usize) -> Vec<Range<usize>> {
    scan::split_ranges(inner, ",")
        .into_iter()
        .filter_map(|range| {
            let part = &inner[range.clone()];
            let leading = part.len() - part.trim_start().len();
            let trailing = part.trim_start().len() - part.trim().len();
            let range = base + range.start + leading..base + range.end - trailing;
            (range.start < range.end).then_some(range)
        })
        .collect()
}

/// Split one map entry, recursing into a multi-entry map value so nested
/// maps indent two spaces deeper.
fn split_entry(entry: &Styled) -> Vec<Styled> {
    let Some(value_start) = entry_value_start(entry.text()) else {
        return vec![entry.clone()];
    };

    let value_lines = split_styled(&entry.slice(value_start..entry.len()));
    if value_lines.len() == 1 {
        return vec![entry.clone()];
    }

    let mut iter = value_lines.into_iter();
    let mut first = entry.slice(0..value_start);
    if let Some(head) = iter.next() {
        first.push_styled(&head);
    }

    let mut lines = vec![first];
    lines.extend(iter);
    lines
}

/// Byte offset where the entry's value begins, after the separator and
/// any whitespace.
fn entry_value_start(entry: &str) -> Option<usize> {
    let after_sep = match scan::find_top_level(entry, "=>") {
        Some(idx) => idx + 2,
        None => scan::keyword_colon_pos(entry)? + 1,
    };
    let value = &entry[after_sep..];
    Some(after_sep + (value.len() - value.trim_start().len()))
}

#[cfg(test)]
mod tests {
    use termdiff_core::DiffSymbols;

    use super::*;

    fn plain_opts() -> DiffOptions {
        DiffOptions::default().with_color(false)
    }

    fn rendered(kind: LineKind, text: &str) -> Vec<String> {
        render(kind, &Styled::plain(text), &plain_opts()).lines
    }

    #[test]
    fn test_single_line_values_stay_single() {
        assert_eq!(rendered(LineKind::Del, ":ok"), vec!["- :ok"]);
        assert_eq!(rendered(LineKind::Ins, "%{a: 1}"), vec!["+ %{a: 1}"]);
    }

    #[test]
    fn test_multi_entry_map_splits_per_entry() {
        assert_eq!(
            rendered(LineKind::Del, "%{a: 1, b: 2}"),
            vec!["- %{", "    a: 1,", "    b: 2", "  }"]
        );
    }

    #[test]
    fn test_nested_map_indents_deeper() {
        assert_eq!(
            rendered(LineKind::Del, "%{a: 1, b: %{c: 2, d: 3}}"),
            vec![
                "- %{",
                "    a: 1,",
                "    b: %{",
                "      c: 2,",
                "      d: 3",
                "    }",
                "  }"
            ]
        );
    }

    #[test]
    fn test_parens_reattach() {
        assert_eq!(
            rendered(LineKind::Ins, "(%{a: 1, b: 2})"),
            vec!["+ (%{", "    a: 1,", "    b: 2", "  })"]
        );
    }

    #[test]
    fn test_collapsed_context_stays_single_line() {
        assert_eq!(
            rendered(LineKind::Del, "%Config{..., port: 80}"),
            vec!["- %Config{..., port: 80}"]
        );
        assert_eq!(
            rendered(LineKind::Ins, "%{..., b: 3}"),
            vec!["+ %{..., b: 3}"]
        );
    }

    #[test]
    fn test_whole_line_color_covers_commas_and_indent() {
        let styled = Styled::colored("%{a: 1, b: 2}", SemanticColor::Deleted);
        let lines = render(LineKind::Del, &styled, &DiffOptions::default()).lines;

        assert!(lines.len() > 1);
        // the blank continuation marker stays plain; everything after it
        // is one styled run, commas and indent included
        for line in &lines[1..] {
            let body = &line[2..];
            assert!(body.starts_with("\x1b["), "unstyled body in {line:?}");
            assert!(body.ends_with("\x1b[0m"), "unstyled tail in {line:?}");
        }
    }

    #[test]
    fn test_continuation_marker_is_blank() {
        let lines = rendered(LineKind::Del, "%{a: 1, b: 2}");
        assert!(lines[0].starts_with("- "));
        assert!(lines[1].starts_with("  "));
    }

    #[test]
    fn test_colored_output_strips_to_plain() {
        let styled = Styled::colored("%{a: 1, b: 2}", SemanticColor::Deleted);
        let color_opts = DiffOptions::default().with_symbols(DiffSymbols::STANDARD);
        let with_color = render(LineKind::Del, &styled, &color_opts);
        let without = render(LineKind::Del, &styled, &plain_opts());

        let stripped: Vec<String> = with_color
            .lines
            .iter()
            .map(|line| strip_ansi(line))
            .collect();
        assert_eq!(stripped, without.lines);
    }

    /// Strip ANSI escape codes from a string
    fn strip_ansi(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    while let Some(&next) = chars.peek() {
                        chars.next();
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }
}
