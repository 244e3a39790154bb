//! Symbols used for diff rendering.

use unicode_width::UnicodeWidthStr;

/// Line markers shown before rendered diff lines.
///
/// The first physical line of a rendered operation carries the marker;
/// continuation lines carry an equal-width blank marker so the term text
/// columns line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffSymbols {
    /// Marker for deleted lines (default: `"- "`)
    pub deleted: &'static str,

    /// Marker for inserted lines (default: `"+ "`)
    pub inserted: &'static str,
}

impl Default for DiffSymbols {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl DiffSymbols {
    /// Standard markers using `"- "` and `"+ "`.
    pub const STANDARD: Self = Self {
        deleted: "- ",
        inserted: "+ ",
    };

    /// The marker for the given line kind.
    pub const fn marker(&self, kind: crate::LineKind) -> &'static str {
        match kind {
            crate::LineKind::Del => self.deleted,
            crate::LineKind::Ins => self.inserted,
        }
    }

    /// Blank continuation marker with the same display width as `marker`.
    pub fn continuation(&self, kind: crate::LineKind) -> String {
        " ".repeat(self.marker(kind).width())
    }
}
