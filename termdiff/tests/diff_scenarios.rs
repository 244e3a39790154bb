//! Snapshot tests for diff output formatting.
//!
//! These tests use insta to capture the diff output format and ensure
//! consistent rendering across changes. Snapshots are taken with colors
//! off; a separate test pins the colored output to its stripped form.

use insta::assert_snapshot;
use termdiff::{DiffOptions, diff_lines, diff_terms};

fn plain() -> DiffOptions {
    DiffOptions::default().with_color(false)
}

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|text| text.to_string()).collect()
}

fn run(expected: &[&str], actual: &[&str]) -> String {
    diff_lines(&lines(expected), &lines(actual), &plain()).join("\n")
}

/// Strip ANSI escape codes from a string
fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip escape sequence
            if chars.peek() == Some(&'[') {
                chars.next(); // consume '['
                // Skip until we hit a letter (end of sequence)
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

// ============================================================================
// Map alignment
// ============================================================================

#[test]
fn map_identical_up_to_key_order() {
    assert_eq!(run(&["%{a: 1, b: 2}"], &["%{b: 2, a: 1}"]), "");
}

#[test]
fn map_entry_added_and_removed() {
    assert_snapshot!(run(&["%{a: 1, b: 2}"], &["%{a: 1, c: 3}"]), @r"
    - b: 2
    + c: 3
    ");
}

#[test]
fn struct_entry_value_changed() {
    assert_snapshot!(
        run(
            &[r#"%User{name: "anna", age: 30}"#],
            &[r#"%User{name: "anna", age: 31}"#],
        ),
        @r"
    - age: 30
    + age: 31
    "
    );
}

#[test]
fn nested_map_values_recurse() {
    assert_snapshot!(
        run(&["%{a: %{x: 1, y: 2}}"], &["%{a: %{x: 1, y: 3}}"]),
        @r"
    - y: 2
    + y: 3
    "
    );
}

// ============================================================================
// Line diff fallback
// ============================================================================

#[test]
fn non_map_lines_pair_with_character_diff() {
    assert_snapshot!(run(&[":ok"], &[":error"]), @r"
    - :ok
    + :error
    ");
}

#[test]
fn surplus_insert_stays_unpaired() {
    assert_snapshot!(
        run(&["x", "old line"], &["x", "new line", "extra"]),
        @r"
    - old line
    + new line
    + extra
    "
    );
}

#[test]
fn struct_context_collapses_around_deep_change() {
    assert_snapshot!(
        run(
            &["start", r#"%Config{host: "a", port: 80, tls: false}"#],
            &["start", r#"%Config{host: "a", port: 443, tls: false}"#],
        ),
        @r"
    - %Config{..., port: 80}
    + %Config{..., port: 443}
    "
    );
}

#[test]
fn unrelated_structs_mask_to_placeholders() {
    assert_snapshot!(
        run(
            &["{%A{x: 1}, {1, 9}, %B{z: 2}}"],
            &["{%A{x: 1}, {1, 8}, %B{z: 2}}"],
        ),
        @r"
    - {%A{...}, {1, 9}, %B{...}}
    + {%A{...}, {1, 8}, %B{...}}
    "
    );
}

// ============================================================================
// Multi-line rendering
// ============================================================================

#[test]
fn inserted_map_splits_per_entry() {
    assert_snapshot!(run(&[], &["%{a: 1, b: 2}"]), @r"
    + %{
        a: 1,
        b: 2
      }
    ");
}

#[test]
fn deleted_nested_map_indents_deeper() {
    assert_snapshot!(run(&["%{a: 1, b: %{c: 2, d: 3}}"], &[]), @r"
    - %{
        a: 1,
        b: %{
          c: 2,
          d: 3
        }
      }
    ");
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn printable_byte_lists_diff_as_strings() {
    let output = diff_terms(
        "%{name: <<97, 110, 110, 97>>}",
        r#"%{name: "anya"}"#,
        &plain(),
    )
    .join("\n");
    assert_snapshot!(output, @r#"
    - name: "anna"
    + name: "anya"
    "#);
}

#[test]
fn absent_expected_side_inserts_everything() {
    assert_snapshot!(
        diff_terms(None::<String>, ":ok", &plain()).join("\n"),
        @"+ :ok"
    );
}

// ============================================================================
// Color output
// ============================================================================

#[test]
fn colored_output_strips_to_plain_output() {
    let expected = lines(&["%{a: 1, b: 2}"]);
    let actual = lines(&["%{a: 1, c: 3}"]);

    let colored = diff_lines(&expected, &actual, &DiffOptions::default());
    let uncolored = diff_lines(&expected, &actual, &plain());

    assert!(colored.iter().any(|line| line.contains('\x1b')));
    let stripped: Vec<String> = colored.iter().map(|line| strip_ansi(line)).collect();
    assert_eq!(stripped, uncolored);
}

#[test]
fn plain_output_carries_no_escapes() {
    let output = run(
        &[r#"%Config{host: "a", port: 80, tls: false}"#],
        &[r#"%Config{host: "a", port: 443, tls: false}"#],
    );
    assert!(!output.contains('\x1b'));
}
