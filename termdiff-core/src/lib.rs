//! Core types and rendering primitives for diff rendering.
//!
//! This crate provides the shared infrastructure the diff engine renders
//! through: color themes, diff symbols, the semantic-color backend
//! abstraction, the styled-span text model, and the diff data model.
//!
//! # Symbols
//!
//! ```text
//! -  deleted (red)
//! +  inserted (green)
//! ```
//!
//! # Region highlighting
//!
//! Within a paired delete/insert, only the REGION that actually differs is
//! highlighted, the shared prefix/suffix stays neutral:
//!
//! ```text
//! - %{status: :ok}      ← "ok" is yellow, the rest is plain
//! + %{status: :error}   ← "error" is yellow, the rest is plain
//! ```

mod backend;
mod styled;
mod symbols;
mod theme;
mod types;

pub use backend::{AnsiBackend, ColorBackend, PlainBackend, SemanticColor};
pub use styled::{StyleSpan, Styled};
pub use symbols::DiffSymbols;
pub use theme::DiffTheme;
pub use types::{DiffOp, DiffSegment, LineKind, RenderedLine};
