//! Character-level diff between two aligned lines.

use termdiff_core::DiffSegment;
use unicode_segmentation::UnicodeSegmentation;

/// Split two lines into common prefix, differing regions, and common
/// suffix.
///
/// Comparison is by grapheme cluster, so a combining accent never splits
/// mid-character. The common suffix is computed on the remainders after
/// the prefix and is therefore capped at the shorter remainder. Identical
/// lines yield empty diff regions on both sides.
pub fn diff_segment(expected: &str, actual: &str) -> DiffSegment {
    let prefix_len = common_prefix_len(expected, actual);
    let expected_rest = &expected[prefix_len..];
    let actual_rest = &actual[prefix_len..];

    let suffix_len = common_suffix_len(expected_rest, actual_rest);

    DiffSegment {
        prefix: expected[..prefix_len].to_string(),
        expected_diff: expected_rest[..expected_rest.len() - suffix_len].to_string(),
        expected_suffix: expected_rest[expected_rest.len() - suffix_len..].to_string(),
        actual_diff: actual_rest[..actual_rest.len() - suffix_len].to_string(),
        actual_suffix: actual_rest[actual_rest.len() - suffix_len..].to_string(),
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ga, gb) in a.graphemes(true).zip(b.graphemes(true)) {
        if ga != gb {
            break;
        }
        len += ga.len();
    }
    len
}

/// Byte length of the common suffix; identical on both sides since the
/// matched graphemes are the same text.
fn common_suffix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ga, gb) in a.graphemes(true).rev().zip(b.graphemes(true).rev()) {
        if ga != gb {
            break;
        }
        len += ga.len();
    }
    len
}
