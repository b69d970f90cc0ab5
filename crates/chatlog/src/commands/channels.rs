//! `chatlog channels` command implementation.

use chatlog_directory::{ChannelFilter, Directory};
use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the channels command.
#[derive(Args)]
pub(crate) struct ChannelsArgs {
    /// Which channels to list: active, archived or all.
    #[arg(short, long, default_value = "active")]
    filter: ChannelFilter,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ChannelsArgs {
    /// Execute the channels command.
    ///
    /// # Errors
    ///
    /// Returns an error if the export cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.config.load()?;
        let directory = Directory::load_export(&config.export_resolved.dir)?;
        let output = Output::new();

        let channels = directory.channels(self.filter);
        for channel in &channels {
            let name = if channel.active {
                format!("#{}", channel.name)
            } else {
                format!("#{} (archived)", channel.name)
            };
            output.print_with_note(&name, &channel.topic)?;
        }
        output.info(&format!("{} channel(s)", channels.len()));
        Ok(())
    }
}
