//! Color backends for diff rendering.
//!
//! This module provides an abstraction for how semantic colors are rendered.
//! The pipeline only knows about semantic meanings (highlighted, deleted,
//! inserted), and the backend decides how to actually style the text.

use std::fmt::Write;

use owo_colors::OwoColorize;

use crate::DiffTheme;

/// Semantic color meaning for diff elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    /// The changed region within a paired line (typically yellow)
    Highlight,
    /// Deleted content (typically red)
    Deleted,
    /// Inserted content (typically green)
    Inserted,
}

/// A backend that decides how to render semantic colors.
pub trait ColorBackend {
    /// Write styled text to the output.
    fn write_styled<W: Write>(
        &self,
        w: &mut W,
        text: &str,
        color: SemanticColor,
    ) -> std::fmt::Result;

    /// Write a diff marker (`"- "` / `"+ "`) with appropriate styling.
    fn write_marker<W: Write>(
        &self,
        w: &mut W,
        marker: &str,
        color: SemanticColor,
    ) -> std::fmt::Result {
        self.write_styled(w, marker, color)
    }
}

/// Plain backend - no styling, just plain text.
///
/// Use this for tests, snapshots, and non-terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBackend;

impl ColorBackend for PlainBackend {
    fn write_styled<W: Write>(
        &self,
        w: &mut W,
        text: &str,
        _color: SemanticColor,
    ) -> std::fmt::Result {
        write!(w, "{}", text)
    }
}

/// ANSI backend - emits ANSI escape codes for terminal colors.
#[derive(Debug, Clone)]
pub struct AnsiBackend {
    theme: DiffTheme,
}

impl AnsiBackend {
    /// Create a new ANSI backend with the given theme.
    pub const fn new(theme: DiffTheme) -> Self {
        Self { theme }
    }

    /// Create a new ANSI backend with the default theme.
    pub fn with_default_theme() -> Self {
        Self::new(DiffTheme::default())
    }
}

impl Default for AnsiBackend {
    fn default() -> Self {
        Self::with_default_theme()
    }
}

impl ColorBackend for AnsiBackend {
    fn write_styled<W: Write>(
        &self,
        w: &mut W,
        text: &str,
        color: SemanticColor,
    ) -> std::fmt::Result {
        let ansi = match color {
            SemanticColor::Highlight => self.theme.highlight,
            SemanticColor::Deleted => self.theme.deleted,
            SemanticColor::Inserted => self.theme.inserted,
        };
        write!(w, "{}", text.color(ansi))
    }
}
