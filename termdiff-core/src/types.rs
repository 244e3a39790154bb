//! Core diff types.
//!
//! These types represent the result of a diff computation and are
//! traversed/rendered by the engine's renderer.

/// A character-level split of two aligned lines.
///
/// Invariant: `prefix + expected_diff + expected_suffix` reconstructs the
/// original expected line, and `prefix + actual_diff + actual_suffix`
/// reconstructs the original actual line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffSegment {
    /// Longest common prefix of the two lines
    pub prefix: String,

    /// The region of the expected line that differs
    pub expected_diff: String,

    /// Common suffix as it appears on the expected line
    pub expected_suffix: String,

    /// The region of the actual line that differs
    pub actual_diff: String,

    /// Common suffix as it appears on the actual line
    pub actual_suffix: String,
}

impl DiffSegment {
    /// True if neither side has a differing region (the lines were equal).
    pub fn is_equal(&self) -> bool {
        self.expected_diff.is_empty() && self.actual_diff.is_empty()
    }
}

/// A single line-level diff operation.
///
/// `Equal` ops exist only inside the engine and are dropped before
/// rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffOp {
    /// The line is present unchanged on both sides
    Equal(String),

    /// The line is only present on the expected side
    Delete(String),

    /// The line is only present on the actual side
    Insert(String),

    /// A positionally paired delete/insert, diffed character-level
    Paired(String, String),
}

impl DiffOp {
    /// True for [`DiffOp::Equal`].
    pub const fn is_equal(&self) -> bool {
        matches!(self, Self::Equal(_))
    }
}

/// Whether a rendered line belongs to the expected or the actual side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// Expected side, rendered with the delete marker
    Del,
    /// Actual side, rendered with the insert marker
    Ins,
}

/// One rendered diff operation: a marker kind plus its physical lines.
///
/// Created fresh per call and consumed immediately by the caller; the
/// physical lines already carry markers and (if enabled) color escapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedLine {
    /// Which side of the diff this renders
    pub kind: LineKind,

    /// The printable physical lines, in order
    pub lines: Vec<String>,
}

impl RenderedLine {
    /// Create a rendered line.
    pub const fn new(kind: LineKind, lines: Vec<String>) -> Self {
        Self { kind, lines }
    }
}
