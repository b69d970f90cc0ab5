//! Link targets and mention resolution.
//!
//! Link syntax is `<target>` or `<target|label>`. The leading sigil of the
//! target decides what is rendered:
//!
//! | target        | output                                         |
//! |---------------|------------------------------------------------|
//! | `@U123`       | anchor labelled `@` + resolved user name       |
//! | `#C456`       | anchor labelled `#` + resolved channel name    |
//! | `!everyone`   | plain text `@everyone`                         |
//! | `http...`     | anchor to the URL, labelled with label or URL  |
//! | anything else | the link as written, untouched                 |

use regex::Captures;

use crate::error::{MentionNotFound, RenderError};
use crate::escape::{escape_attribute, escape_text};
use crate::spans::Fragment;

/// Directory lookup for user and channel mentions.
///
/// Implementations return a short display name for an ID, or
/// [`MentionNotFound`] when the ID is unknown. Lookups are expected to be
/// idempotent reads.
pub trait MentionResolver: Send + Sync {
    /// Resolve a user ID (without the `@` sigil) to a display name.
    fn resolve_user(&self, id: &str) -> Result<String, MentionNotFound>;

    /// Resolve a channel ID (without the `#` sigil) to a display name.
    fn resolve_channel(&self, id: &str) -> Result<String, MentionNotFound>;
}

/// Decoded target of a `<target|label>` link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// `@id`: user mention.
    User(&'a str),
    /// `#id`: channel mention.
    Channel(&'a str),
    /// `!name`: special mention such as `!everyone` or `!here`.
    Broadcast(&'a str),
    /// Target starting with `http`.
    Url {
        /// Link destination.
        href: &'a str,
        /// Optional label after `|`.
        label: Option<&'a str>,
    },
    /// Anything else; the link is left as written.
    Unrecognized,
}

impl<'a> LinkTarget<'a> {
    /// Decode a link target by its leading sigil.
    ///
    /// The label is only kept for URLs; mentions always display the
    /// resolved name.
    ///
    /// # Example
    ///
    /// ```
    /// use chatlog_markup::LinkTarget;
    ///
    /// assert_eq!(LinkTarget::parse("@U123", Some("bob")), LinkTarget::User("U123"));
    /// assert_eq!(
    ///     LinkTarget::parse("https://example.com", None),
    ///     LinkTarget::Url { href: "https://example.com", label: None }
    /// );
    /// ```
    #[must_use]
    pub fn parse(target: &'a str, label: Option<&'a str>) -> Self {
        if let Some(id) = target.strip_prefix('@') {
            Self::User(id)
        } else if let Some(id) = target.strip_prefix('#') {
            Self::Channel(id)
        } else if let Some(name) = target.strip_prefix('!') {
            Self::Broadcast(name)
        } else if target.starts_with("http") {
            Self::Url {
                href: target,
                label,
            }
        } else {
            Self::Unrecognized
        }
    }
}

/// Render one link rule match.
///
/// Group 1 of `caps` is the target, group 2 the optional label.
pub(crate) fn render_link<R: MentionResolver + ?Sized>(
    caps: &Captures<'_>,
    resolver: &R,
    mention_href: &str,
) -> Result<Fragment, RenderError> {
    let target = caps.get(1).map_or("", |m| m.as_str());
    let label = caps.get(2).map(|m| m.as_str());

    let fragment = match LinkTarget::parse(target, label) {
        LinkTarget::User(id) => {
            let name = resolver.resolve_user(id)?;
            Fragment::protected(anchor(mention_href, &format!("@{name}")))
        }
        LinkTarget::Channel(id) => {
            let name = resolver.resolve_channel(id)?;
            Fragment::protected(anchor(mention_href, &format!("#{name}")))
        }
        LinkTarget::Broadcast(name) => Fragment::raw(format!("@{name}")),
        LinkTarget::Url { href, label } => Fragment::protected(anchor(href, label.unwrap_or(href))),
        LinkTarget::Unrecognized => Fragment::raw(caps.get(0).map_or("", |m| m.as_str())),
    };
    Ok(fragment)
}

fn anchor(href: &str, label: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        escape_attribute(href),
        escape_text(label)
    )
}
