//! `chatlog channel` command implementation.

use chatlog_directory::{Directory, ExportError, load_channel_messages};
use chatlog_markup::Renderer;
use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::html::message_block;
use crate::output::Output;

/// Arguments for the channel command.
#[derive(Args)]
pub(crate) struct ChannelArgs {
    /// Channel name, without `#`.
    name: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ChannelArgs {
    /// Execute the channel command.
    ///
    /// # Errors
    ///
    /// Returns an error if the export cannot be loaded or the channel does
    /// not exist. Messages that fail to render are reported inline.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.config.load()?;
        let export_dir = &config.export_resolved.dir;
        let directory = Directory::load_export(export_dir)?;

        let channel = directory
            .channel_by_name(&self.name)
            .ok_or_else(|| ExportError::ChannelNotFound(self.name.clone()))?;
        let messages = load_channel_messages(export_dir, channel)?;

        let renderer = Renderer::new(config.render_options());
        let output = Output::new();
        for message in &messages {
            output.print(&message_block(&renderer, &directory, message))?;
        }
        output.info(&format!("{} message(s) in #{}", messages.len(), channel.name));
        Ok(())
    }
}
