//! Message rendering pipeline.

use crate::error::RenderError;
use crate::escape::{escape_entities, normalize_transport_entities};
use crate::mention::MentionResolver;
use crate::rules::RULES;
use crate::spans::SpanList;

/// Placeholder destination for mention anchors.
pub const DEFAULT_MENTION_HREF: &str = "javascript:void(0)";

/// Marker that replaces line breaks in the output.
pub const DEFAULT_LINE_BREAK: &str = "<br/>";

/// Output settings for [`Renderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// `href` of user and channel mention anchors.
    pub mention_href: String,
    /// HTML emitted for every `\n`.
    pub line_break: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mention_href: DEFAULT_MENTION_HREF.to_owned(),
            line_break: DEFAULT_LINE_BREAK.to_owned(),
        }
    }
}

/// Converts chat markup into an HTML fragment.
///
/// A renderer holds no per-message state; one instance can render any number
/// of messages, from any number of threads.
///
/// # Example
///
/// ```
/// use chatlog_markup::{MentionKind, MentionNotFound, MentionResolver, RenderOptions, Renderer};
///
/// struct Team;
///
/// impl MentionResolver for Team {
///     fn resolve_user(&self, id: &str) -> Result<String, MentionNotFound> {
///         match id {
///             "U1" => Ok("alice".to_owned()),
///             _ => Err(MentionNotFound::new(MentionKind::User, id)),
///         }
///     }
///
///     fn resolve_channel(&self, id: &str) -> Result<String, MentionNotFound> {
///         Err(MentionNotFound::new(MentionKind::Channel, id))
///     }
/// }
///
/// let renderer = Renderer::new(RenderOptions {
///     mention_href: "#".to_owned(),
///     ..RenderOptions::default()
/// });
/// let html = renderer.render("hi <@U1>\n_bye_", &Team).unwrap();
/// assert_eq!(html, r##"hi <a href="#">@alice</a><br/><i>bye</i>"##);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options this renderer was built with.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render one message.
    ///
    /// Unbalanced markup is kept as literal text. The only failure is a
    /// mention the resolver does not know.
    pub fn render<R: MentionResolver + ?Sized>(
        &self,
        text: &str,
        resolver: &R,
    ) -> Result<String, RenderError> {
        let mut spans = SpanList::new(normalize_transport_entities(text));
        for rule in &RULES {
            rule.apply(&mut spans, resolver, &self.options.mention_href)?;
        }
        escape_entities(&mut spans);
        Ok(spans.finish(&self.options.line_break))
    }
}

/// Render one message with default [`RenderOptions`].
pub fn render_message<R: MentionResolver + ?Sized>(
    text: &str,
    resolver: &R,
) -> Result<String, RenderError> {
    Renderer::default().render(text, resolver)
}
