//! Rendering error types.

use std::fmt;

/// Kind of directory entry a mention refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MentionKind {
    /// `<@U123>` user mention.
    User,
    /// `<#C456>` channel mention.
    Channel,
}

impl fmt::Display for MentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Channel => f.write_str("channel"),
        }
    }
}

/// A mention whose ID is absent from the directory.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {id}")]
pub struct MentionNotFound {
    /// What was looked up.
    pub kind: MentionKind,
    /// The ID as written in the message.
    pub id: String,
}

impl MentionNotFound {
    /// Create a not found error for the given mention.
    #[must_use]
    pub fn new(kind: MentionKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Message rendering error.
///
/// Malformed markup is never an error; it passes through as literal text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A user or channel mention could not be resolved.
    #[error(transparent)]
    UnknownMention(#[from] MentionNotFound),
}
