//! Message search over an export.
//!
//! Two modes:
//!
//! - text search: messages containing any query term, case-insensitively,
//!   optionally limited to one channel
//! - context view: every message of one channel posted within
//!   [`CONTEXT_WINDOW_SECS`] of a given message

use std::path::Path;

use crate::directory::{Channel, ChannelFilter, Directory};
use crate::error::ExportError;
use crate::export::load_channel_messages;
use crate::message::{Message, ts_from_message_id};

/// Half-width of the context view around a message, in seconds.
pub const CONTEXT_WINDOW_SECS: i64 = 60 * 60;

/// What to look for.
#[derive(Clone, Copy, Debug)]
pub enum Search<'a> {
    /// Messages containing any whitespace-separated term of `query`.
    Text {
        /// Search terms.
        query: &'a str,
        /// Restrict to this channel; all channels otherwise.
        channel: Option<&'a Channel>,
    },
    /// Messages of `channel` around `message_id` (`<ts>/<user>`).
    Context {
        /// Center of the window.
        message_id: &'a str,
        /// Channel the message was posted to.
        channel: &'a Channel,
    },
}

/// Whether `text` contains any term of `query`, ignoring case.
///
/// A query without terms matches nothing.
#[must_use]
pub fn matches_query(text: &str, query: &str) -> bool {
    let text = text.to_lowercase();
    query
        .split_whitespace()
        .any(|term| text.contains(&term.to_lowercase()))
}

/// Whether `message` falls strictly inside the context window around `center`.
#[must_use]
pub fn in_context_window(message: &Message, center: i64) -> bool {
    message.ts > center - CONTEXT_WINDOW_SECS && message.ts < center + CONTEXT_WINDOW_SECS
}

/// Run a search, returning hits newest first.
///
/// # Errors
///
/// Returns [`ExportError`] if a day file cannot be read, or
/// [`ExportError::InvalidMessageId`] for a malformed context message ID.
pub fn search_messages(
    dir: &Path,
    directory: &Directory,
    search: Search<'_>,
) -> Result<Vec<Message>, ExportError> {
    let mut hits = match search {
        Search::Text { query, channel } => {
            let channels = match channel {
                Some(channel) => vec![channel],
                None => directory.channels(ChannelFilter::All),
            };
            let mut hits = Vec::new();
            for channel in channels {
                hits.extend(
                    load_channel_messages(dir, channel)?
                        .into_iter()
                        .filter(|m| matches_query(&m.text, query)),
                );
            }
            hits
        }
        Search::Context {
            message_id,
            channel,
        } => {
            let center = ts_from_message_id(message_id)?;
            load_channel_messages(dir, channel)?
                .into_iter()
                .filter(|m| in_context_window(m, center))
                .collect()
        }
    };

    hits.sort_by(|a, b| (b.ts, b.ts_dot).cmp(&(a.ts, a.ts_dot)));
    tracing::debug!(hit_count = hits.len(), "Search completed");
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::message::MessageId;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn directory() -> Directory {
        Directory::new()
            .with_channel(Channel::new("C1", "general"))
            .with_channel(Channel::new("C2", "random").archived())
    }

    fn export() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "general/2017-07-14.json",
            r#"[
                {"user": "U1", "text": "Deploy is done", "ts": "1500000000.000001"},
                {"user": "U2", "text": "lunch?", "ts": "1500003000.000001"},
                {"user": "U1", "text": "next day", "ts": "1500003600.000001"},
                {"user": "U2", "text": "day before", "ts": "1499996400.000001"}
            ]"#,
        );
        write(
            temp.path(),
            "random/2017-07-14.json",
            r#"[{"user": "U2", "text": "who broke the deploy", "ts": "1500001000.000001"}]"#,
        );
        temp
    }

    fn texts(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn test_matches_query_any_term_ignoring_case() {
        assert!(matches_query("Deploy is done", "deploy"));
        assert!(matches_query("lunch?", "deploy lunch"));
        assert!(!matches_query("lunch?", "dinner"));
        assert!(!matches_query("anything", "   "));
    }

    #[test]
    fn test_in_context_window_is_exclusive() {
        let at = |ts: &str| Message::new(MessageId::new(ts, "U1").unwrap(), "", "C1");
        let center = 1_500_000_000;

        assert!(in_context_window(&at("1500000000.000001"), center));
        assert!(in_context_window(&at("1500003599.000001"), center));
        assert!(!in_context_window(&at("1500003600.000001"), center));
        assert!(!in_context_window(&at("1499996400.000001"), center));
    }

    #[test]
    fn test_text_search_all_channels() {
        let temp = export();
        let dir = directory();

        let hits = search_messages(
            temp.path(),
            &dir,
            Search::Text {
                query: "DEPLOY",
                channel: None,
            },
        )
        .unwrap();

        assert_eq!(texts(&hits), vec!["who broke the deploy", "Deploy is done"]);
        assert_eq!(hits[0].channel, "C2");
    }

    #[test]
    fn test_text_search_one_channel() {
        let temp = export();
        let dir = directory();
        let general = dir.channel("C1").unwrap();

        let hits = search_messages(
            temp.path(),
            &dir,
            Search::Text {
                query: "deploy",
                channel: Some(general),
            },
        )
        .unwrap();

        assert_eq!(texts(&hits), vec!["Deploy is done"]);
    }

    #[test]
    fn test_context_search_window() {
        let temp = export();
        let dir = directory();
        let general = dir.channel("C1").unwrap();

        let hits = search_messages(
            temp.path(),
            &dir,
            Search::Context {
                message_id: "1500000000.000001/U1",
                channel: general,
            },
        )
        .unwrap();

        assert_eq!(texts(&hits), vec!["lunch?", "Deploy is done"]);
    }

    #[test]
    fn test_context_search_invalid_message_id() {
        let temp = export();
        let dir = directory();
        let general = dir.channel("C1").unwrap();

        let err = search_messages(
            temp.path(),
            &dir,
            Search::Context {
                message_id: "not-an-id",
                channel: general,
            },
        )
        .unwrap_err();

        assert!(matches!(err, ExportError::InvalidMessageId(_)));
    }
}
