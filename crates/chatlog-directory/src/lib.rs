//! User and channel directory for chat archives.
//!
//! This crate provides the [`Directory`] that backs mention resolution for
//! [`chatlog_markup`], plus loading of an unpacked workspace export:
//!
//! - `users.json` and `channels.json` become a [`Directory`]
//! - per-channel day files (`<channel>/<YYYY-MM-DD>.json`) become
//!   [`Message`]s, newest first
//! - [`search_messages`] finds messages by text or around a message
//!
//! # Example
//!
//! ```
//! use chatlog_directory::{Channel, Directory, User};
//! use chatlog_markup::render_message;
//!
//! let directory = Directory::new()
//!     .with_user(User::new("U1", "alice"))
//!     .with_channel(Channel::new("C1", "general"));
//!
//! let html = render_message("<@U1> in <#C1>", &directory).unwrap();
//! assert_eq!(
//!     html,
//!     r#"<a href="javascript:void(0)">@alice</a> in <a href="javascript:void(0)">#general</a>"#
//! );
//! ```

mod directory;
mod error;
mod export;
mod message;
mod search;

pub use directory::{Channel, ChannelFilter, Directory, SLACKBOT_ID, User};
pub use error::ExportError;
pub use export::load_channel_messages;
pub use message::{Message, MessageId, ts_from_message_id};
pub use search::{CONTEXT_WINDOW_SECS, Search, in_context_window, matches_query, search_messages};
