//! The diff engine: alignment, pairing, and operation rendering.
//!
//! Two paths produce output. When both sides are a single map or struct
//! literal, entries are aligned by key and diffed row by row, recursing
//! into nested literals. Everything else goes through a Myers line diff
//! whose delete/insert runs are paired positionally and refined with a
//! character-level diff.

use termdiff_core::{
    DiffOp, DiffSymbols, DiffTheme, LineKind, RenderedLine, SemanticColor, Styled,
};

use crate::compact::{compact, mask_other_structs};
use crate::map::{self, AlignedEntry};
use crate::myers;
use crate::normalize::{self, TermInput};
use crate::render::render;
use crate::segment::diff_segment;

/// Rendering options for a diff run.
#[derive(Clone, Copy, Debug)]
pub struct DiffOptions {
    /// Emit ANSI escape codes; with `false` the output is plain text
    pub color: bool,
    /// Semantic color palette used when `color` is on
    pub theme: DiffTheme,
    /// Line markers for deleted and inserted lines
    pub symbols: DiffSymbols,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            color: true,
            theme: DiffTheme::STANDARD,
            symbols: DiffSymbols::STANDARD,
        }
    }
}

impl DiffOptions {
    /// Options with colors on and the standard theme and symbols.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle ANSI color output.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Replace the color theme.
    #[must_use]
    pub fn with_theme(mut self, theme: DiffTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Replace the line markers.
    #[must_use]
    pub fn with_symbols(mut self, symbols: DiffSymbols) -> Self {
        self.symbols = symbols;
        self
    }
}

/// Diff two normalized line sequences into rendered operations.
///
/// Identical inputs produce no output. Deleted lines come out before
/// inserted lines within every changed region.
pub fn diff(expected: &[String], actual: &[String], opts: &DiffOptions) -> Vec<RenderedLine> {
    if let [expected_line] = expected
        && let [actual_line] = actual
        && let Ok(rows) = map::align(expected_line, actual_line)
    {
        log::trace!("diffing aligned map entries");
        return diff_rows(rows, opts);
    }

    log::trace!("falling back to line diff");
    render_ops(&pair_runs(myers::diff_ops(expected, actual)), opts)
}

/// Flatten [`diff`] output into physical lines.
pub fn diff_lines(expected: &[String], actual: &[String], opts: &DiffOptions) -> Vec<String> {
    diff(expected, actual, opts)
        .into_iter()
        .flat_map(|rendered| rendered.lines)
        .collect()
}

/// Normalize two raw terms and diff them.
///
/// The one-call entry point: accepts anything convertible to
/// [`TermInput`] on either side.
pub fn diff_terms(
    expected: impl Into<TermInput>,
    actual: impl Into<TermInput>,
    opts: &DiffOptions,
) -> Vec<String> {
    diff_lines(
        &normalize::normalize(expected),
        &normalize::normalize(actual),
        opts,
    )
}

/// Diff key-aligned map rows.
///
/// Keys present on one side only become whole deleted or inserted
/// entries; keys whose values are both map literals recurse; any other
/// changed value gets a character-level diff of the entry text.
fn diff_rows(rows: Vec<AlignedEntry>, opts: &DiffOptions) -> Vec<RenderedLine> {
    let mut out = Vec::new();

    for row in rows {
        match (row.expected, row.actual) {
            (None, None) => {}
            (Some(value), None) => {
                let entry = row.sep.entry(&row.key, &value);
                out.push(render(
                    LineKind::Del,
                    &Styled::colored(entry, SemanticColor::Deleted),
                    opts,
                ));
            }
            (None, Some(value)) => {
                let entry = row.sep.entry(&row.key, &value);
                out.push(render(
                    LineKind::Ins,
                    &Styled::colored(entry, SemanticColor::Inserted),
                    opts,
                ));
            }
            (Some(expected), Some(actual)) => {
                if expected == actual {
                    continue;
                }
                if map::parse_map(&expected).is_ok() && map::parse_map(&actual).is_ok() {
                    out.extend(diff(
                        &[expected.clone()],
                        &[actual.clone()],
                        opts,
                    ));
                    continue;
                }

                let segment = diff_segment(
                    &row.sep.entry(&row.key, &expected),
                    &row.sep.entry(&row.key, &actual),
                );
                let del = highlighted(&segment.prefix, &segment.expected_diff, &segment.expected_suffix);
                let ins = highlighted(&segment.prefix, &segment.actual_diff, &segment.actual_suffix);
                out.push(render(LineKind::Del, &del, opts));
                out.push(render(LineKind::Ins, &ins, opts));
            }
        }
    }

    out
}

fn highlighted(prefix: &str, diff: &str, suffix: &str) -> Styled {
    let mut styled = Styled::plain(prefix);
    styled.push_colored(diff, SemanticColor::Highlight);
    styled.push_plain(suffix);
    styled
}

/// Pair each delete run with the insert run that follows it.
///
/// Lines are matched positionally within the run; surplus lines on
/// either side stay plain deletes or inserts.
fn pair_runs(ops: Vec<DiffOp>) -> Vec<DiffOp> {
    let mut out = Vec::with_capacity(ops.len());
    let mut deletes: Vec<String> = Vec::new();
    let mut inserts: Vec<String> = Vec::new();

    let flush = |out: &mut Vec<DiffOp>, deletes: &mut Vec<String>, inserts: &mut Vec<String>| {
        let paired = deletes.len().min(inserts.len());
        let surplus_deletes = deletes.split_off(paired);
        let surplus_inserts = inserts.split_off(paired);
        for (del, ins) in deletes.drain(..).zip(inserts.drain(..)) {
            out.push(DiffOp::Paired(del, ins));
        }
        out.extend(surplus_deletes.into_iter().map(DiffOp::Delete));
        out.extend(surplus_inserts.into_iter().map(DiffOp::Insert));
    };

    for op in ops {
        match op {
            DiffOp::Delete(line) => deletes.push(line),
            DiffOp::Insert(line) => inserts.push(line),
            DiffOp::Equal(_) => {
                flush(&mut out, &mut deletes, &mut inserts);
                out.push(op);
            }
            DiffOp::Paired(..) => out.push(op),
        }
    }
    flush(&mut out, &mut deletes, &mut inserts);
    out
}

/// Render paired operations, equal lines skipped.
fn render_ops(ops: &[DiffOp], opts: &DiffOptions) -> Vec<RenderedLine> {
    let mut out = Vec::new();

    for op in ops {
        match op {
            DiffOp::Equal(_) => {}
            DiffOp::Delete(line) => {
                out.push(render(
                    LineKind::Del,
                    &Styled::colored(line.clone(), SemanticColor::Deleted),
                    opts,
                ));
            }
            DiffOp::Insert(line) => {
                out.push(render(
                    LineKind::Ins,
                    &Styled::colored(line.clone(), SemanticColor::Inserted),
                    opts,
                ));
            }
            DiffOp::Paired(expected, actual) => {
                let segment = diff_segment(expected, actual);
                if segment.is_equal() {
                    continue;
                }

                if let Some((del, ins)) = compact(&segment.prefix, expected, &segment) {
                    out.push(render(LineKind::Del, &del, opts));
                    out.push(render(LineKind::Ins, &ins, opts));
                    continue;
                }

                let start = segment.prefix.len();
                let del = mask_other_structs(
                    expected,
                    start..start + segment.expected_diff.len(),
                );
                let ins = mask_other_structs(actual, start..start + segment.actual_diff.len());
                out.push(render(LineKind::Del, &del, opts));
                out.push(render(LineKind::Ins, &ins, opts));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_opts() -> DiffOptions {
        DiffOptions::default().with_color(false)
    }

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn test_identical_terms_produce_nothing() {
        let input = lines(&["%{a: 1, b: 2}"]);
        assert!(diff_lines(&input, &input, &plain_opts()).is_empty());
    }

    #[test]
    fn test_map_keys_align_regardless_of_order() {
        let expected = lines(&["%{a: 1, b: 2}"]);
        let actual = lines(&["%{b: 2, a: 1}"]);
        assert!(diff_lines(&expected, &actual, &plain_opts()).is_empty());
    }

    #[test]
    fn test_map_entry_add_and_remove() {
        let expected = lines(&["%{a: 1, b: 2}"]);
        let actual = lines(&["%{a: 1, c: 3}"]);
        assert_eq!(
            diff_lines(&expected, &actual, &plain_opts()),
            vec!["- b: 2", "+ c: 3"]
        );
    }

    #[test]
    fn test_changed_value_shows_entry_pair() {
        let expected = lines(&["%{n: 100}"]);
        let actual = lines(&["%{n: 200}"]);
        assert_eq!(
            diff_lines(&expected, &actual, &plain_opts()),
            vec!["- n: 100", "+ n: 200"]
        );
    }

    #[test]
    fn test_nested_maps_recurse() {
        let expected = lines(&["%{a: %{x: 1, y: 2}}"]);
        let actual = lines(&["%{a: %{x: 1, y: 3}}"]);
        assert_eq!(
            diff_lines(&expected, &actual, &plain_opts()),
            vec!["- y: 2", "+ y: 3"]
        );
    }

    #[test]
    fn test_struct_name_change_is_visible() {
        let expected = lines(&["%Foo{a: 1}"]);
        let actual = lines(&["%Bar{a: 1}"]);
        assert_eq!(
            diff_lines(&expected, &actual, &plain_opts()),
            vec!["- %Foo{a: 1}", "+ %Bar{a: 1}"]
        );

        let expected = lines(&["%User{a: 1}"]);
        let actual = lines(&["%{a: 1}"]);
        assert_eq!(
            diff_lines(&expected, &actual, &plain_opts()),
            vec!["- %User{a: 1}", "+ %{a: 1}"]
        );
    }

    #[test]
    fn test_non_map_lines_pair_positionally() {
        let expected = lines(&[":ok"]);
        let actual = lines(&[":error"]);
        assert_eq!(
            diff_lines(&expected, &actual, &plain_opts()),
            vec!["- :ok", "+ :error"]
        );
    }

    #[test]
    fn test_pure_insertion_keeps_context_silent() {
        let expected = lines(&["a"]);
        let actual = lines(&["a", "b"]);
        assert_eq!(diff_lines(&expected, &actual, &plain_opts()), vec!["+ b"]);
    }

    #[test]
    fn test_struct_context_compacts_in_line_diff() {
        let expected = lines(&[
            "start",
            "%Config{host: \"a\", port: 80, tls: false}",
        ]);
        let actual = lines(&[
            "start",
            "%Config{host: \"a\", port: 443, tls: false}",
        ]);
        assert_eq!(
            diff_lines(&expected, &actual, &plain_opts()),
            vec!["- %Config{..., port: 80}", "+ %Config{..., port: 443}"]
        );
    }

    #[test]
    fn test_pair_runs_matches_positionally() {
        let ops = vec![
            DiffOp::Delete("a".to_string()),
            DiffOp::Delete("b".to_string()),
            DiffOp::Insert("c".to_string()),
        ];
        assert_eq!(
            pair_runs(ops),
            vec![
                DiffOp::Paired("a".to_string(), "c".to_string()),
                DiffOp::Delete("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_diff_terms_normalizes_first() {
        let output = diff_terms(
            "%{name: <<97, 110, 110, 97>>}",
            "%{name: \"anya\"}",
            &plain_opts(),
        );
        assert_eq!(output, vec!["- name: \"anna\"", "+ name: \"anya\""]);
    }

    #[test]
    fn test_absent_side_inserts_everything() {
        let output = diff_terms(None::<String>, ":ok", &plain_opts());
        assert_eq!(output, vec!["+ :ok"]);
    }
}
