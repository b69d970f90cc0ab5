//! Markup rules in precedence order.
//!
//! [`RULES`] is the ordered configuration the renderer runs. Verbatim rules
//! (pre, code) come first so their bodies are protected before any markup
//! rule can see them. Markup rules protect only their tags; the inner text
//! stays raw for the rules that follow, which is how `*bold _and italic_*`
//! composes.

use std::convert::Infallible;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::RenderError;
use crate::escape::escape_verbatim;
use crate::mention::{MentionResolver, render_link};
use crate::spans::{Fragment, SpanList};

static PRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\B```(.+?)```\B").expect("invalid pre regex"));

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B`(.+?)`\B").expect("invalid code regex"));

static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>(.+?)$").expect("invalid quote regex"));

static STRIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B~(.+?)~\B").expect("invalid strike regex"));

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B\*(.+?)\*\B").expect("invalid bold regex"));

// Word boundaries, unlike strike and bold: `snake_case` must stay as is.
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_(.+?)_\b").expect("invalid italic regex"));

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B<([^|>]+)\|?([^|>]+)?>\B").expect("invalid link regex"));

/// How a wrapping rule treats the text it matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleMode {
    /// Escape the body and protect the whole element (code, pre).
    Verbatim,
    /// Protect only the tags; the body stays raw (quote, strike, bold, italic).
    Markup,
}

/// What a rule does with a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleAction {
    /// Wrap capture group 1 in `<tag>...</tag>`.
    Wrap {
        /// HTML element name.
        tag: &'static str,
        /// Verbatim or markup handling of the body.
        mode: RuleMode,
    },
    /// Decode a `<target|label>` link.
    Link,
}

/// A single markup rule.
#[derive(Debug)]
pub struct Rule {
    /// Short rule name, used in logs.
    pub name: &'static str,
    pattern: &'static LazyLock<Regex>,
    /// What the rule produces for each match.
    pub action: RuleAction,
}

/// All markup rules, in the order they are applied.
pub static RULES: [Rule; 7] = [
    Rule::wrap("pre", &PRE_RE, "pre", RuleMode::Verbatim),
    Rule::wrap("code", &CODE_RE, "code", RuleMode::Verbatim),
    Rule::wrap("quote", &QUOTE_RE, "blockquote", RuleMode::Markup),
    Rule::wrap("strike", &STRIKE_RE, "strike", RuleMode::Markup),
    Rule::wrap("bold", &BOLD_RE, "b", RuleMode::Markup),
    Rule::wrap("italic", &ITALIC_RE, "i", RuleMode::Markup),
    Rule {
        name: "link",
        pattern: &LINK_RE,
        action: RuleAction::Link,
    },
];

impl Rule {
    const fn wrap(
        name: &'static str,
        pattern: &'static LazyLock<Regex>,
        tag: &'static str,
        mode: RuleMode,
    ) -> Self {
        Self {
            name,
            pattern,
            action: RuleAction::Wrap { tag, mode },
        }
    }

    /// Compiled pattern of this rule.
    #[must_use]
    pub fn pattern(&self) -> &Regex {
        self.pattern
    }

    /// Apply the rule to every raw span of `spans`.
    ///
    /// Returns the number of matches replaced.
    pub(crate) fn apply<R: MentionResolver + ?Sized>(
        &self,
        spans: &mut SpanList,
        resolver: &R,
        mention_href: &str,
    ) -> Result<usize, RenderError> {
        let count = match self.action {
            RuleAction::Wrap { tag, mode } => {
                let Ok(count) = spans.apply_outside_protected::<Infallible, _>(self.pattern(), |caps| {
                    Ok(wrap(tag, mode, caps))
                });
                count
            }
            RuleAction::Link => spans.apply_outside_protected(self.pattern(), |caps| {
                render_link(caps, resolver, mention_href)
            })?,
        };
        tracing::trace!(rule = self.name, count, "Applied markup rule");
        Ok(count)
    }
}

fn wrap(tag: &str, mode: RuleMode, caps: &Captures<'_>) -> Fragment {
    let body = caps.get(1).map_or("", |m| m.as_str());
    match mode {
        RuleMode::Verbatim => {
            Fragment::protected(format!("<{tag}>{}</{tag}>", escape_verbatim(body)))
        }
        RuleMode::Markup => Fragment::protected(format!("<{tag}>"))
            .push_raw(body)
            .push_protected(format!("</{tag}>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::{MentionKind, MentionNotFound};
    use crate::spans::Span;

    struct NoMentions;

    impl MentionResolver for NoMentions {
        fn resolve_user(&self, id: &str) -> Result<String, MentionNotFound> {
            Err(MentionNotFound::new(MentionKind::User, id))
        }

        fn resolve_channel(&self, id: &str) -> Result<String, MentionNotFound> {
            Err(MentionNotFound::new(MentionKind::Channel, id))
        }
    }

    fn rule(name: &str) -> &'static Rule {
        RULES.iter().find(|r| r.name == name).unwrap()
    }

    fn apply(name: &str, text: &str) -> SpanList {
        let mut spans = SpanList::new(text);
        rule(name)
            .apply(&mut spans, &NoMentions, "javascript:void(0)")
            .unwrap();
        spans
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["pre", "code", "quote", "strike", "bold", "italic", "link"]
        );
    }

    #[test]
    fn test_rule_modes() {
        let verbatim: Vec<_> = RULES
            .iter()
            .filter(|r| {
                matches!(
                    r.action,
                    RuleAction::Wrap {
                        mode: RuleMode::Verbatim,
                        ..
                    }
                )
            })
            .map(|r| r.name)
            .collect();
        assert_eq!(verbatim, vec!["pre", "code"]);
        assert_eq!(rule("link").action, RuleAction::Link);
    }

    #[test]
    fn test_all_patterns_compile() {
        for rule in &RULES {
            assert!(!rule.pattern().as_str().is_empty(), "{}", rule.name);
        }
    }

    #[test]
    fn test_pre_spans_newlines() {
        let spans = apply("pre", "```a\n<b>```");
        assert_eq!(
            spans.spans(),
            &[Span::Protected("<pre>a\n&#60;b></pre>".to_owned())]
        );
    }

    #[test]
    fn test_code_is_single_line() {
        let spans = apply("code", "`a\nb`");
        assert_eq!(spans.to_text(), "`a\nb`");
        assert!(spans.protected_ranges().is_empty());
    }

    #[test]
    fn test_code_verbatim() {
        let spans = apply("code", "run `ls *` now");
        assert_eq!(
            spans.spans(),
            &[
                Span::Raw("run ".to_owned()),
                Span::Protected("<code>ls *</code>".to_owned()),
                Span::Raw(" now".to_owned()),
            ]
        );
    }

    #[test]
    fn test_quote_per_line() {
        let spans = apply("quote", ">one\ntwo\n>three");
        assert_eq!(
            spans.to_text(),
            "<blockquote>one</blockquote>\ntwo\n<blockquote>three</blockquote>"
        );
    }

    #[test]
    fn test_quote_needs_content() {
        let spans = apply("quote", ">\nx");
        assert!(spans.protected_ranges().is_empty());
    }

    #[test]
    fn test_markup_body_stays_raw() {
        let spans = apply("bold", "*a b*");
        assert_eq!(
            spans.spans(),
            &[
                Span::Protected("<b>".to_owned()),
                Span::Raw("a b".to_owned()),
                Span::Protected("</b>".to_owned()),
            ]
        );
    }

    #[test]
    fn test_strike_requires_non_word_boundary() {
        assert_eq!(apply("strike", "a~b~c").to_text(), "a~b~c");
        assert_eq!(
            apply("strike", "a ~b~ c").to_text(),
            "a <strike>b</strike> c"
        );
    }

    #[test]
    fn test_bold_requires_non_word_boundary() {
        assert_eq!(apply("bold", "2*3*4").to_text(), "2*3*4");
        assert_eq!(
            apply("bold", "hello *world*!").to_text(),
            "hello <b>world</b>!"
        );
    }

    #[test]
    fn test_italic_requires_word_boundary() {
        assert_eq!(apply("italic", "snake_case_name").to_text(), "snake_case_name");
        assert_eq!(apply("italic", "an _idea_ here").to_text(), "an <i>idea</i> here");
    }

    #[test]
    fn test_italic_boundary_asymmetry() {
        // Italic keeps word-boundary anchors while bold uses non-word-boundary
        // anchors, so the same shapes behave differently.
        assert_eq!(apply("italic", "(_x_)").to_text(), "(<i>x</i>)");
        assert_eq!(apply("bold", "(*x*)").to_text(), "(<b>x</b>)");
        assert_eq!(apply("italic", "a_x_b").to_text(), "a_x_b");
        assert_eq!(apply("bold", "a*x*b").to_text(), "a*x*b");
    }

    #[test]
    fn test_link_requires_non_word_boundary() {
        assert_eq!(apply("link", "x<!here>y").to_text(), "x<!here>y");
        assert_eq!(apply("link", "x <!here> y").to_text(), "x @here y");
    }

    #[test]
    fn test_link_unknown_mention_fails() {
        let mut spans = SpanList::new("<@U1>");
        let result = rule("link").apply(&mut spans, &NoMentions, "#");
        assert_eq!(
            result,
            Err(RenderError::UnknownMention(MentionNotFound::new(
                MentionKind::User,
                "U1"
            )))
        );
        assert_eq!(spans.to_text(), "<@U1>");
    }

    #[test]
    fn test_unmatched_delimiters_pass_through() {
        for name in ["pre", "code", "strike", "bold", "italic"] {
            let spans = apply(name, "a ` b ~ c * d _ e");
            assert!(spans.protected_ranges().is_empty(), "{name}");
        }
    }
}
