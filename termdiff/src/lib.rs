#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod compact;
mod diff;
mod map;
mod myers;
mod normalize;
mod render;
mod scan;
mod segment;

pub use compact::{compact, mask_other_structs};
pub use diff::{DiffOptions, diff, diff_lines, diff_terms};
pub use map::{AlignedEntry, KeySep, MapEntry, MapLiteral, NotAMap, align, parse_map};
pub use myers::diff_ops;
pub use normalize::{
    IdentityPrinter, PrintError, TermInput, TermPrinter, normalize, normalize_with,
};
pub use render::render;
pub use scan::{DelimScanner, find_top_level, matching_close, split_top_level};
pub use segment::diff_segment;

pub use termdiff_core::{
    AnsiBackend, ColorBackend, DiffOp, DiffSegment, DiffSymbols, DiffTheme, LineKind,
    PlainBackend, RenderedLine, SemanticColor, StyleSpan, Styled,
};
