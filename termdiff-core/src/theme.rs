//! Color themes for diff rendering.

use owo_colors::AnsiColors;

/// Color theme for diff rendering.
///
/// The defaults match what the analysis engine's own output uses: yellow
/// for the changed region inside a paired line, red for deletions, green
/// for insertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffTheme {
    /// Color for the changed region within a paired line (default: yellow)
    pub highlight: AnsiColors,

    /// Color for deleted content (default: red)
    pub deleted: AnsiColors,

    /// Color for inserted content (default: green)
    pub inserted: AnsiColors,
}

impl Default for DiffTheme {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl DiffTheme {
    /// Standard theme (yellow / red / green).
    pub const STANDARD: Self = Self {
        highlight: AnsiColors::Yellow,
        deleted: AnsiColors::Red,
        inserted: AnsiColors::Green,
    };

    /// Get the color for a semantic meaning.
    pub const fn color_for(&self, color: crate::SemanticColor) -> AnsiColors {
        match color {
            crate::SemanticColor::Highlight => self.highlight,
            crate::SemanticColor::Deleted => self.deleted,
            crate::SemanticColor::Inserted => self.inserted,
        }
    }
}
