//! Raw/protected span tracking for the working text.
//!
//! A message under transformation is a sequence of spans. Raw spans hold user
//! text that rules may still rewrite; protected spans hold HTML the
//! transformer already produced. Rules only ever see raw spans, so emitted
//! markup can never be re-matched or escaped.

use std::ops::Range;

use regex::{Captures, Regex};

/// One span of the working text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    /// User text, still eligible for substitution and escaping.
    Raw(String),
    /// Finished HTML, copied to the output unchanged.
    Protected(String),
}

impl Span {
    /// Text content of the span.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Raw(text) | Self::Protected(text) => text,
        }
    }

    /// Whether the span holds finished HTML.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Protected(_))
    }
}

/// Replacement produced for a single rule match.
///
/// # Example
///
/// ```
/// use chatlog_markup::{Fragment, Span};
///
/// let fragment = Fragment::protected("<b>")
///     .push_raw("inner")
///     .push_protected("</b>");
///
/// assert_eq!(fragment.spans()[1], Span::Raw("inner".to_owned()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    spans: Vec<Span>,
}

impl Fragment {
    /// Fragment consisting of raw text only.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::default().push_raw(text)
    }

    /// Fragment consisting of finished HTML only.
    #[must_use]
    pub fn protected(html: impl Into<String>) -> Self {
        Self::default().push_protected(html)
    }

    /// Append raw text.
    #[must_use]
    pub fn push_raw(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::Raw(text.into()));
        self
    }

    /// Append finished HTML.
    #[must_use]
    pub fn push_protected(mut self, html: impl Into<String>) -> Self {
        self.spans.push(Span::Protected(html.into()));
        self
    }

    /// Spans of this fragment in order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }
}

/// Working text as an ordered list of raw and protected spans.
///
/// Invariants:
/// - no two raw spans are adjacent (they are merged on insertion)
/// - no raw span is empty
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanList {
    spans: Vec<Span>,
}

impl SpanList {
    /// Create a span list holding `text` as a single raw span.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let mut list = Self::default();
        push_span(&mut list.spans, Span::Raw(text.into()));
        list
    }

    /// Spans in document order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Byte ranges of protected spans within [`to_text`](Self::to_text).
    ///
    /// Ranges are ordered and never overlap.
    #[must_use]
    pub fn protected_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut offset = 0;
        for span in &self.spans {
            let end = offset + span.as_str().len();
            if span.is_protected() {
                ranges.push(offset..end);
            }
            offset = end;
        }
        ranges
    }

    /// Concatenated text of all spans.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.spans.iter().map(Span::as_str).collect()
    }

    /// Replace every match of `pattern` in raw spans with the fragment
    /// returned by `transform`.
    ///
    /// Each raw span is matched on its own, so `^`, `$`, `\b` and `\B` treat
    /// the borders of a raw span like the borders of the text. Protected spans
    /// are carried over byte for byte. Returns the number of matches replaced.
    ///
    /// If `transform` fails, the list is left untouched and the error is
    /// returned.
    pub fn apply_outside_protected<E, F>(
        &mut self,
        pattern: &Regex,
        mut transform: F,
    ) -> Result<usize, E>
    where
        F: FnMut(&Captures<'_>) -> Result<Fragment, E>,
    {
        let mut out = Vec::with_capacity(self.spans.len());
        let mut replaced = 0;

        for span in &self.spans {
            let text = match span {
                Span::Protected(_) => {
                    out.push(span.clone());
                    continue;
                }
                Span::Raw(text) => text,
            };

            let mut last = 0;
            for caps in pattern.captures_iter(text) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                push_span(&mut out, Span::Raw(text[last..whole.start()].to_owned()));
                for piece in transform(&caps)?.spans {
                    push_span(&mut out, piece);
                }
                last = whole.end();
                replaced += 1;
            }
            push_span(&mut out, Span::Raw(text[last..].to_owned()));
        }

        self.spans = out;
        Ok(replaced)
    }

    /// Join all spans into the final string, replacing every `\n` with
    /// `line_break`.
    #[must_use]
    pub fn finish(self, line_break: &str) -> String {
        let mut out = String::with_capacity(self.spans.iter().map(|s| s.as_str().len()).sum());
        for span in &self.spans {
            let text = span.as_str();
            if text.contains('\n') {
                out.push_str(&text.replace('\n', line_break));
            } else {
                out.push_str(text);
            }
        }
        out
    }
}

/// Push a span, dropping empty raw text and merging adjacent raw spans.
fn push_span(spans: &mut Vec<Span>, span: Span) {
    match span {
        Span::Raw(text) if text.is_empty() => {}
        Span::Raw(text) => {
            if let Some(Span::Raw(last)) = spans.last_mut() {
                last.push_str(&text);
            } else {
                spans.push(Span::Raw(text));
            }
        }
        Span::Protected(_) => spans.push(span),
    }
}
