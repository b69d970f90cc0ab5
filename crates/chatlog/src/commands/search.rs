//! `chatlog search` command implementation.

use chatlog_directory::{Directory, ExportError, Search, search_messages};
use chatlog_markup::Renderer;
use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::html::message_block;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Search terms; a message matches if it contains any of them.
    #[arg(required_unless_present = "context")]
    query: Option<String>,

    /// Only search this channel (name, without `#`).
    #[arg(long)]
    channel: Option<String>,

    /// Show the messages around this message ID (`<ts>/<user>`) instead
    /// of searching.
    #[arg(long, requires = "channel")]
    context: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

impl SearchArgs {
    /// Execute the search command.
    ///
    /// # Errors
    ///
    /// Returns an error if the export cannot be loaded, the channel does not
    /// exist or the context message ID is malformed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.config.load()?;
        let export_dir = &config.export_resolved.dir;
        let directory = Directory::load_export(export_dir)?;

        let channel = self
            .channel
            .as_deref()
            .map(|name| {
                directory
                    .channel_by_name(name)
                    .ok_or_else(|| ExportError::ChannelNotFound(name.to_owned()))
            })
            .transpose()?;

        let search = match (self.context.as_deref(), channel) {
            (Some(message_id), Some(channel)) => Search::Context {
                message_id,
                channel,
            },
            _ => Search::Text {
                query: self.query.as_deref().unwrap_or_default(),
                channel,
            },
        };
        let hits = search_messages(export_dir, &directory, search)?;

        let renderer = Renderer::new(config.render_options());
        let output = Output::new();
        for message in &hits {
            output.print(&message_block(&renderer, &directory, message))?;
        }
        output.info(&format!("{} message(s) found", hits.len()));
        Ok(())
    }
}
