//! Message identity and records.

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

/// Stable message identifier `<seconds>.<fraction>/<user>`.
///
/// The timestamp is kept as exported so that the identifier round-trips
/// exactly; leading zeros in the fraction are significant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageId {
    timestamp: String,
    user: String,
}

impl MessageId {
    /// Build an ID from an exported timestamp and a user ID.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidMessageId`] if `timestamp` is not two
    /// dot-separated integers.
    pub fn new(timestamp: &str, user: &str) -> Result<Self, ExportError> {
        let id = Self {
            timestamp: timestamp.to_owned(),
            user: user.to_owned(),
        };
        id.split_timestamp()?;
        Ok(id)
    }

    /// Exported timestamp (e.g., `1500000000.000123`).
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Author's user ID.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Whole seconds of the timestamp.
    #[must_use]
    pub fn ts(&self) -> i64 {
        self.split_timestamp().map_or(0, |(ts, _)| ts)
    }

    /// Fractional part of the timestamp as an integer.
    #[must_use]
    pub fn ts_dot(&self) -> u64 {
        self.split_timestamp().map_or(0, |(_, dot)| dot)
    }

    fn split_timestamp(&self) -> Result<(i64, u64), ExportError> {
        let invalid = || ExportError::InvalidMessageId(self.to_string());
        let (secs, frac) = self.timestamp.split_once('.').ok_or_else(invalid)?;
        let ts = secs.parse().map_err(|_| invalid())?;
        let dot = frac.parse().map_err(|_| invalid())?;
        Ok((ts, dot))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.timestamp, self.user)
    }
}

impl FromStr for MessageId {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (timestamp, user) = s
            .split_once('/')
            .filter(|(_, user)| !user.is_empty())
            .ok_or_else(|| ExportError::InvalidMessageId(s.to_owned()))?;
        Self::new(timestamp, user)
    }
}

/// Extract the whole seconds from a message ID string.
///
/// # Errors
///
/// Returns [`ExportError::InvalidMessageId`] if `id` is malformed.
pub fn ts_from_message_id(id: &str) -> Result<i64, ExportError> {
    id.parse::<MessageId>().map(|id| id.ts())
}

/// A message posted to a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Message identifier.
    pub id: MessageId,
    /// Whole seconds since the epoch.
    pub ts: i64,
    /// Fractional part of the timestamp, for ordering within a second.
    pub ts_dot: u64,
    /// Message body in chat markup.
    pub text: String,
    /// Author's user ID.
    pub user: String,
    /// Channel ID the message was posted to.
    pub channel: String,
}

impl Message {
    /// Build a message, deriving `ts`/`ts_dot` from the ID.
    #[must_use]
    pub fn new(id: MessageId, text: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            ts: id.ts(),
            ts_dot: id.ts_dot(),
            user: id.user().to_owned(),
            text: text.into(),
            channel: channel.into(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_message_id_display() {
        let id = MessageId::new("1500000000.000123", "U1").unwrap();
        assert_eq!(id.to_string(), "1500000000.000123/U1");
    }

    #[test]
    fn test_message_id_parse() {
        let id: MessageId = "1500000000.000123/U1".parse().unwrap();
        assert_eq!(id.timestamp(), "1500000000.000123");
        assert_eq!(id.user(), "U1");
        assert_eq!(id.ts(), 1_500_000_000);
        assert_eq!(id.ts_dot(), 123);
    }

    #[test]
    fn test_message_id_parse_rejects_malformed() {
        for bad in ["", "1500000000.1", "1500000000.1/", "abc.1/U1", "1500000000/U1", "1.x/U1"] {
            let err = bad.parse::<MessageId>().unwrap_err();
            assert!(
                matches!(err, ExportError::InvalidMessageId(_)),
                "expected InvalidMessageId for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_ts_from_message_id() {
        assert_eq!(ts_from_message_id("1500000000.999999/U1").unwrap(), 1_500_000_000);
        assert!(ts_from_message_id("nope").is_err());
    }

    #[test]
    fn test_message_new_derives_fields() {
        let id = MessageId::new("1500000001.000002", "U7").unwrap();
        let msg = Message::new(id.clone(), "hi", "C1");

        assert_eq!(msg.ts, 1_500_000_001);
        assert_eq!(msg.ts_dot, 2);
        assert_eq!(msg.user, "U7");
        assert_eq!(msg.channel, "C1");
        assert_eq!(msg.id, id);
    }
}
