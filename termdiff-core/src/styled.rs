//! Styled text as `(plain_text, spans)`.
//!
//! Color never lives inside the pipeline's text as escape codes. Instead a
//! [`Styled`] carries plain text plus a set of byte-range spans tagged with
//! a [`SemanticColor`], and escapes are serialized only at final render
//! time by a [`ColorBackend`]. Slicing a `Styled` redistributes its spans,
//! so splitting a value across physical lines can never break or duplicate
//! an escape sequence.

use std::ops::Range;

use crate::{ColorBackend, SemanticColor};

/// A colored byte range within a [`Styled`]'s text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StyleSpan {
    /// Start byte offset
    pub start: u32,
    /// End byte offset (exclusive)
    pub end: u32,
    /// Semantic color of the range
    pub color: SemanticColor,
}

impl StyleSpan {
    /// Byte length of the span
    #[inline]
    pub const fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    /// Check if span is empty
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Plain text plus non-overlapping, ordered color spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Styled {
    text: String,
    spans: Vec<StyleSpan>,
}

impl Styled {
    /// Create styled text with no colored spans.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Create styled text colored as a whole.
    pub fn colored(text: impl Into<String>, color: SemanticColor) -> Self {
        let text = text.into();
        let mut styled = Self::plain(text);
        if !styled.text.is_empty() {
            styled.spans.push(StyleSpan {
                start: 0,
                end: styled.text.len() as u32,
                color,
            });
        }
        styled
    }

    /// The underlying plain text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The color spans, ordered and non-overlapping.
    #[inline]
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Byte length of the plain text.
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the text is empty.
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append uncolored text.
    pub fn push_plain(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append text colored as a whole.
    ///
    /// Adjacent spans of the same color are merged so rendering emits one
    /// escape sequence per run.
    pub fn push_colored(&mut self, text: &str, color: SemanticColor) {
        if text.is_empty() {
            return;
        }
        let start = self.text.len() as u32;
        self.text.push_str(text);
        let end = self.text.len() as u32;

        if let Some(last) = self.spans.last_mut()
            && last.end == start
            && last.color == color
        {
            last.end = end;
            return;
        }
        self.spans.push(StyleSpan { start, end, color });
    }

    /// Append another styled text, rebasing its spans.
    pub fn push_styled(&mut self, other: &Styled) {
        let offset = self.text.len() as u32;
        self.text.push_str(&other.text);
        for span in &other.spans {
            if let Some(last) = self.spans.last_mut()
                && last.end == span.start + offset
                && last.color == span.color
            {
                last.end = span.end + offset;
                continue;
            }
            self.spans.push(StyleSpan {
                start: span.start + offset,
                end: span.end + offset,
                color: span.color,
            });
        }
    }

    /// Slice out a byte range, clamping and rebasing spans.
    ///
    /// `range` must fall on character boundaries of the plain text.
    pub fn slice(&self, range: Range<usize>) -> Styled {
        let text = self.text[range.clone()].to_string();
        let (lo, hi) = (range.start as u32, range.end as u32);

        let spans = self
            .spans
            .iter()
            .filter(|span| span.start < hi && span.end > lo)
            .map(|span| StyleSpan {
                start: span.start.max(lo) - lo,
                end: span.end.min(hi) - lo,
                color: span.color,
            })
            .collect();

        Styled { text, spans }
    }

    /// Serialize through a color backend.
    ///
    /// Uncolored gaps are written verbatim; colored spans go through the
    /// backend, which decides whether escape codes are emitted at all.
    pub fn render<B: ColorBackend>(&self, backend: &B) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0usize;

        for span in &self.spans {
            let (start, end) = (span.start as usize, span.end as usize);
            out.push_str(&self.text[cursor..start]);
            backend
                .write_styled(&mut out, &self.text[start..end], span.color)
                .expect("writing to String cannot fail");
            cursor = end;
        }

        out.push_str(&self.text[cursor..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnsiBackend, PlainBackend};

    #[test]
    fn test_plain_roundtrip() {
        let styled = Styled::plain("%{a: 1}");
        assert_eq!(styled.text(), "%{a: 1}");
        assert_eq!(styled.render(&PlainBackend), "%{a: 1}");
        assert!(styled.spans().is_empty());
    }

    #[test]
    fn test_push_colored_merges_adjacent_runs() {
        let mut styled = Styled::plain("a");
        styled.push_colored("b", SemanticColor::Highlight);
        styled.push_colored("c", SemanticColor::Highlight);
        styled.push_colored("d", SemanticColor::Deleted);
        assert_eq!(styled.text(), "abcd");
        assert_eq!(styled.spans().len(), 2);
        assert_eq!(styled.spans()[0].len(), 2);
    }

    #[test]
    fn test_slice_rebases_spans() {
        let mut styled = Styled::plain("key: ");
        styled.push_colored("value", SemanticColor::Highlight);
        styled.push_plain("}");

        let sliced = styled.slice(5..10);
        assert_eq!(sliced.text(), "value");
        assert_eq!(
            sliced.spans(),
            &[StyleSpan {
                start: 0,
                end: 5,
                color: SemanticColor::Highlight
            }]
        );
    }

    #[test]
    fn test_slice_clamps_partial_overlap() {
        let styled = Styled::colored("abcdef", SemanticColor::Inserted);
        let sliced = styled.slice(2..4);
        assert_eq!(sliced.text(), "cd");
        assert_eq!(sliced.spans()[0].start, 0);
        assert_eq!(sliced.spans()[0].end, 2);
    }

    #[test]
    fn test_render_plain_equals_stripped_ansi() {
        let mut styled = Styled::plain("x = ");
        styled.push_colored("1", SemanticColor::Deleted);

        let plain = styled.render(&PlainBackend);
        let ansi = styled.render(&AnsiBackend::default());
        assert_eq!(plain, "x = 1");
        assert!(ansi.contains("\x1b["));
        assert!(ansi.len() > plain.len());
    }

    #[test]
    fn test_push_styled_rebases() {
        let mut left = Styled::plain("(");
        let inner = Styled::colored("body", SemanticColor::Highlight);
        left.push_styled(&inner);
        left.push_plain(")");

        assert_eq!(left.text(), "(body)");
        assert_eq!(left.spans()[0].start, 1);
        assert_eq!(left.spans()[0].end, 5);
    }
}
