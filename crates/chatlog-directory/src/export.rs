//! Loading an unpacked workspace export.
//!
//! Layout:
//!
//! ```text
//! export/
//! ├── users.json
//! ├── channels.json
//! └── general/
//!     ├── 2017-07-13.json
//!     └── 2017-07-14.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::directory::{Channel, Directory, User};
use crate::error::ExportError;
use crate::message::{Message, MessageId};

#[derive(Deserialize)]
struct RawUser {
    id: String,
    name: String,
    #[serde(default)]
    profile: RawProfile,
}

#[derive(Default, Deserialize)]
struct RawProfile {
    #[serde(default)]
    real_name: String,
    #[serde(default)]
    image_72: String,
}

#[derive(Deserialize)]
struct RawChannel {
    id: String,
    name: String,
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    topic: RawTopic,
    #[serde(default)]
    pins: Vec<RawPin>,
}

#[derive(Default, Deserialize)]
struct RawTopic {
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct RawPin {
    id: String,
    user: String,
}

#[derive(Deserialize)]
struct RawMessage {
    ts: String,
    user: Option<String>,
    #[serde(default)]
    text: String,
    // Any non-null subtype (joins, bot posts, edits) marks a system message.
    subtype: Option<serde_json::Value>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ExportError> {
    let content = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| ExportError::json(path, e))
}

impl Directory {
    /// Load users and channels from an export directory.
    ///
    /// The built-in slackbot user is always added.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if `users.json` or `channels.json` cannot be
    /// read or parsed.
    pub fn load_export(dir: &Path) -> Result<Self, ExportError> {
        let users: Vec<RawUser> = read_json(&dir.join("users.json"))?;
        let channels: Vec<RawChannel> = read_json(&dir.join("channels.json"))?;

        let mut directory = Self::new();
        for raw in users {
            directory.insert_user(User {
                id: raw.id,
                login: raw.name,
                real_name: raw.profile.real_name,
                avatar: raw.profile.image_72,
            });
        }
        directory.insert_user(User::slackbot());

        for raw in channels {
            directory.insert_channel(Channel {
                id: raw.id,
                name: raw.name,
                active: !raw.is_archived,
                topic: raw.topic.value,
                pins: raw
                    .pins
                    .into_iter()
                    .map(|pin| format!("{}/{}", pin.id, pin.user))
                    .collect(),
            });
        }

        tracing::info!(
            path = %dir.display(),
            user_count = directory.user_count(),
            channel_count = directory.channel_count(),
            "Export loaded"
        );
        Ok(directory)
    }
}

/// Load every message of `channel`, newest first.
///
/// Reads all day files under `<dir>/<channel name>/`. System messages
/// (anything with a `subtype`) are skipped, as are messages without an
/// author or with a malformed timestamp. A channel with no folder has no
/// messages.
///
/// # Errors
///
/// Returns [`ExportError`] if a day file cannot be read or parsed.
pub fn load_channel_messages(dir: &Path, channel: &Channel) -> Result<Vec<Message>, ExportError> {
    let channel_dir = dir.join(&channel.name);
    let Ok(entries) = fs::read_dir(&channel_dir) else {
        tracing::debug!(path = %channel_dir.display(), "No day files for channel");
        return Ok(Vec::new());
    };

    let mut day_files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "json"))
        .collect();
    day_files.sort();

    let mut messages = Vec::new();
    for path in &day_files {
        let raw: Vec<RawMessage> = read_json(path)?;
        for msg in raw {
            if msg.subtype.is_some() {
                continue;
            }
            let Some(user) = msg.user else {
                tracing::warn!(path = %path.display(), ts = %msg.ts, "Skipping message without user");
                continue;
            };
            match MessageId::new(&msg.ts, &user) {
                Ok(id) => messages.push(Message::new(id, msg.text, channel.id.as_str())),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping message");
                }
            }
        }
    }

    messages.sort_by(|a, b| (b.ts, b.ts_dot).cmp(&(a.ts, a.ts_dot)));

    tracing::debug!(
        channel = %channel.name,
        day_files = day_files.len(),
        message_count = messages.len(),
        "Channel messages loaded"
    );
    Ok(messages)
}
