//! Entity escaping for raw text and rule output.
//!
//! Only `<` and `>` are escaped. Exported messages already carry `&amp;` and
//! `&lt;` entities, so escaping `&` would double-encode them.

use std::convert::Infallible;
use std::sync::LazyLock;

use regex::Regex;

use crate::spans::{Fragment, SpanList};

static ANGLE_BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>]").expect("invalid angle bracket regex"));

/// Undo the `&gt;` encoding some exports apply to message text.
///
/// Quote detection relies on a literal leading `>`.
pub(crate) fn normalize_transport_entities(text: &str) -> String {
    text.replace("&gt;", ">")
}

/// Escape `<` and `>` in every raw span.
///
/// Each escaped bracket becomes a protected entity, so escaping an already
/// escaped list is a no-op. Returns the number of brackets escaped.
pub(crate) fn escape_entities(spans: &mut SpanList) -> usize {
    let Ok(count) = spans.apply_outside_protected::<Infallible, _>(&ANGLE_BRACKET_RE, |caps| {
        let entity = if &caps[0] == "<" { "&lt;" } else { "&gt;" };
        Ok(Fragment::protected(entity))
    });
    count
}

/// Escape the body of a verbatim (code or pre) block.
///
/// Verbatim bodies never reach [`escape_entities`], so tags are neutralised
/// here, when the block is wrapped.
pub(crate) fn escape_verbatim(body: &str) -> String {
    body.replace('<', "&#60;")
}

/// Escape `<` and `>` for use as HTML text.
///
/// # Example
///
/// ```
/// use chatlog_markup::escape_text;
///
/// assert_eq!(escape_text("<b>a &amp; b</b>"), "&lt;b&gt;a &amp; b&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a value placed inside a double-quoted HTML attribute.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
