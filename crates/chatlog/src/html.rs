//! HTML blocks for rendered messages.

use chatlog_directory::{Directory, Message};
use chatlog_markup::{Renderer, escape_attribute, escape_text};
use chrono::DateTime;

/// Display format of message times, as in `ctime(3)`.
const DISPLAY_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Render one message as an HTML block.
///
/// The header carries the author's avatar, login and full name, the channel
/// and the posting time (UTC). Messages pinned in their channel get the
/// `pinned` class. A message with an unknown mention becomes an error block
/// so that the rest of the page still renders.
pub(crate) fn message_block(renderer: &Renderer, directory: &Directory, message: &Message) -> String {
    let (mut class, body) = match renderer.render(&message.text, directory) {
        Ok(body) => ("message".to_owned(), body),
        Err(e) => {
            tracing::warn!(id = %message.id, error = %e, "Failed to render message");
            ("message error".to_owned(), escape_text(&e.to_string()))
        }
    };

    let id = message.id.to_string();
    let channel = directory.channel(&message.channel);
    if channel.is_some_and(|c| c.pins.contains(&id)) {
        class.push_str(" pinned");
    }
    let channel_name = channel.map_or(message.channel.as_str(), |c| c.name.as_str());

    let user = directory.user(&message.user);
    let avatar = user
        .map(|u| u.avatar.as_str())
        .filter(|a| !a.is_empty())
        .map(|a| format!(r#"<img class="avatar" src="{}" alt=""/>"#, escape_attribute(a)))
        .unwrap_or_default();
    let title = user
        .map(|u| u.real_name.as_str())
        .filter(|n| !n.is_empty())
        .map(|n| format!(r#" title="{}""#, escape_attribute(n)))
        .unwrap_or_default();
    let login = user.map_or(message.user.as_str(), |u| u.login.as_str());

    format!(
        concat!(
            r#"<div class="{class}" id="{id}">{avatar}"#,
            r#"<span class="author"{title}>{login}</span>"#,
            r#" <span class="channel">#{channel}</span> {time}"#,
            r#"<div class="body">{body}</div></div>"#
        ),
        class = class,
        id = escape_attribute(&id),
        avatar = avatar,
        title = title,
        login = escape_text(login),
        channel = escape_text(channel_name),
        time = posted_at(message.ts),
        body = body,
    )
}

/// `<time>` element for a timestamp in seconds.
fn posted_at(ts: i64) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(time) => format!(
            r#"<time datetime="{}">{}</time>"#,
            time.format("%Y-%m-%dT%H:%M:%SZ"),
            time.format(DISPLAY_TIME_FORMAT)
        ),
        None => format!("<time>{ts}</time>"),
    }
}
