//! Chat message markup to HTML transformer.
//!
//! Converts messages written in the constrained chat markup (`*bold*`,
//! `_italic_`, `~strike~`, `` `code` ``, ```` ```pre``` ````, `>quote` and
//! `<target|label>` links) into an HTML fragment that is safe to embed in a
//! page without further escaping.
//!
//! # Architecture
//!
//! The message is held as a [`SpanList`]: an ordered sequence of raw spans
//! (user text) and protected spans (HTML produced by the transformer). Every
//! stage works through [`SpanList::apply_outside_protected`], so nothing the
//! transformer emitted is ever scanned again:
//!
//! 1. Transport entities (`&gt;`) are normalised back to `>`.
//! 2. The ordered [`RULES`] run one after another (pre, code, quote, strike,
//!    bold, italic, link).
//! 3. Remaining `<` and `>` in raw text are entity-escaped.
//! 4. Spans are joined and line breaks become `<br/>`.
//!
//! Mentions (`<@U123>`, `<#C456>`) are resolved through a caller-supplied
//! [`MentionResolver`].
//!
//! # Example
//!
//! ```
//! use chatlog_markup::{MentionKind, MentionNotFound, MentionResolver, render_message};
//!
//! struct Nobody;
//!
//! impl MentionResolver for Nobody {
//!     fn resolve_user(&self, id: &str) -> Result<String, MentionNotFound> {
//!         Err(MentionNotFound::new(MentionKind::User, id))
//!     }
//!
//!     fn resolve_channel(&self, id: &str) -> Result<String, MentionNotFound> {
//!         Err(MentionNotFound::new(MentionKind::Channel, id))
//!     }
//! }
//!
//! let html = render_message("hello *world* <b>", &Nobody).unwrap();
//! assert_eq!(html, "hello <b>world</b> &lt;b&gt;");
//! ```

mod error;
mod escape;
mod mention;
mod render;
mod rules;
mod spans;

pub use error::{MentionKind, MentionNotFound, RenderError};
pub use escape::{escape_attribute, escape_text};
pub use mention::{LinkTarget, MentionResolver};
pub use render::{DEFAULT_LINE_BREAK, DEFAULT_MENTION_HREF, RenderOptions, Renderer, render_message};
pub use rules::{RULES, Rule, RuleAction, RuleMode};
pub use spans::{Fragment, Span, SpanList};
