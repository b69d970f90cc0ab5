//! In-memory user and channel directory.

use std::collections::HashMap;
use std::str::FromStr;

use chatlog_markup::{MentionKind, MentionNotFound, MentionResolver};

/// ID of the built-in bot user, which never appears in `users.json`.
pub const SLACKBOT_ID: &str = "USLACKBOT";

/// A workspace member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// User ID (e.g., `U064J5B3A`).
    pub id: String,
    /// Login handle, shown in mentions.
    pub login: String,
    /// Full name from the profile.
    pub real_name: String,
    /// Avatar URL.
    pub avatar: String,
}

impl User {
    /// Create a user with only an ID and a login.
    #[must_use]
    pub fn new(id: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            login: login.into(),
            real_name: String::new(),
            avatar: String::new(),
        }
    }

    /// The built-in bot user.
    #[must_use]
    pub fn slackbot() -> Self {
        Self {
            id: SLACKBOT_ID.to_owned(),
            login: "slackbot".to_owned(),
            real_name: "slackbot".to_owned(),
            avatar: "https://a.slack-edge.com/0180/img/slackbot_72.png".to_owned(),
        }
    }
}

/// A public channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    /// Channel ID (e.g., `C064J5B3C`).
    pub id: String,
    /// Channel name without `#`.
    pub name: String,
    /// False once the channel is archived.
    pub active: bool,
    /// Channel topic.
    pub topic: String,
    /// Pinned message IDs (`<ts>/<user>`).
    pub pins: Vec<String>,
}

impl Channel {
    /// Create an active channel with no topic or pins.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
            topic: String::new(),
            pins: Vec::new(),
        }
    }

    /// Mark the channel as archived.
    #[must_use]
    pub fn archived(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Which channels to list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelFilter {
    /// Every channel.
    All,
    /// Channels that are not archived.
    #[default]
    Active,
    /// Archived channels only.
    Archived,
}

impl ChannelFilter {
    fn matches(self, channel: &Channel) -> bool {
        match self {
            Self::All => true,
            Self::Active => channel.active,
            Self::Archived => !channel.active,
        }
    }
}

impl FromStr for ChannelFilter {
    type Err = String;

    /// Parse a filter name. `archive` is accepted as an alias of `archived`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "archive" | "archived" => Ok(Self::Archived),
            other => Err(format!(
                "unknown channel filter '{other}' (expected all, active or archived)"
            )),
        }
    }
}

/// Users and channels of one workspace, keyed by ID.
///
/// Use the builder methods to populate a directory in tests, or
/// [`Directory::load_export`] to read one from disk.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    users: HashMap<String, User>,
    channels: HashMap<String, Channel>,
}

impl Directory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, replacing any user with the same ID.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.insert_user(user);
        self
    }

    /// Add a channel, replacing any channel with the same ID.
    #[must_use]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.insert_channel(channel);
        self
    }

    pub(crate) fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub(crate) fn insert_channel(&mut self, channel: Channel) {
        self.channels.insert(channel.id.clone(), channel);
    }

    /// Look up a user by ID.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Look up a channel by ID.
    #[must_use]
    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.get(id)
    }

    /// Look up a channel by name.
    #[must_use]
    pub fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        self.channels.values().find(|c| c.name == name)
    }

    /// Channels matching `filter`, sorted by name.
    #[must_use]
    pub fn channels(&self, filter: ChannelFilter) -> Vec<&Channel> {
        let mut channels: Vec<_> = self
            .channels
            .values()
            .filter(|c| filter.matches(c))
            .collect();
        channels.sort_by(|a, b| a.name.cmp(&b.name));
        channels
    }

    /// Number of users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl MentionResolver for Directory {
    fn resolve_user(&self, id: &str) -> Result<String, MentionNotFound> {
        self.user(id)
            .map(|u| u.login.clone())
            .ok_or_else(|| MentionNotFound::new(MentionKind::User, id))
    }

    fn resolve_channel(&self, id: &str) -> Result<String, MentionNotFound> {
        self.channel(id)
            .map(|c| c.name.clone())
            .ok_or_else(|| MentionNotFound::new(MentionKind::Channel, id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn directory() -> Directory {
        Directory::new()
            .with_user(User::new("U1", "alice"))
            .with_user(User::new("U2", "bob"))
            .with_channel(Channel::new("C2", "random"))
            .with_channel(Channel::new("C1", "general"))
            .with_channel(Channel::new("C3", "old").archived())
    }

    #[test]
    fn test_resolve_user_returns_login() {
        assert_eq!(directory().resolve_user("U1").unwrap(), "alice");
    }

    #[test]
    fn test_resolve_channel_returns_name() {
        assert_eq!(directory().resolve_channel("C1").unwrap(), "general");
    }

    #[test]
    fn test_resolve_unknown_is_not_found() {
        let dir = directory();
        assert_eq!(
            dir.resolve_user("U9").unwrap_err(),
            MentionNotFound::new(MentionKind::User, "U9")
        );
        assert_eq!(
            dir.resolve_channel("C9").unwrap_err(),
            MentionNotFound::new(MentionKind::Channel, "C9")
        );
    }

    #[test]
    fn test_with_user_replaces_same_id() {
        let dir = directory().with_user(User::new("U1", "alice2"));
        assert_eq!(dir.user_count(), 2);
        assert_eq!(dir.user("U1").unwrap().login, "alice2");
    }

    #[test]
    fn test_channels_sorted_and_filtered() {
        let dir = directory();
        let names = |filter| {
            dir.channels(filter)
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(names(ChannelFilter::Active), vec!["general", "random"]);
        assert_eq!(names(ChannelFilter::Archived), vec!["old"]);
        assert_eq!(names(ChannelFilter::All), vec!["general", "old", "random"]);
    }

    #[test]
    fn test_channel_by_name() {
        let dir = directory();
        assert_eq!(dir.channel_by_name("random").unwrap().id, "C2");
        assert!(dir.channel_by_name("missing").is_none());
    }

    #[test]
    fn test_channel_filter_from_str() {
        assert_eq!("all".parse(), Ok(ChannelFilter::All));
        assert_eq!("active".parse(), Ok(ChannelFilter::Active));
        assert_eq!("archive".parse(), Ok(ChannelFilter::Archived));
        assert_eq!("archived".parse(), Ok(ChannelFilter::Archived));
        assert!("bogus".parse::<ChannelFilter>().is_err());
        assert_eq!(ChannelFilter::default(), ChannelFilter::Active);
    }

    #[test]
    fn test_slackbot_user() {
        let bot = User::slackbot();
        assert_eq!(bot.id, SLACKBOT_ID);
        assert_eq!(bot.login, "slackbot");
    }
}
