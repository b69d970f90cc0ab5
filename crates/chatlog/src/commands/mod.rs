//! CLI command implementations.

pub(crate) mod channel;
pub(crate) mod channels;
pub(crate) mod render;
pub(crate) mod search;

use std::path::PathBuf;

use chatlog_config::{CliSettings, Config};
use clap::Args;

use crate::error::CliError;

pub(crate) use channel::ChannelArgs;
pub(crate) use channels::ChannelsArgs;
pub(crate) use render::RenderArgs;
pub(crate) use search::SearchArgs;

/// Configuration arguments shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover chatlog.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Unpacked export directory (overrides config).
    #[arg(short, long, env = "CHATLOG_EXPORT_DIR")]
    export_dir: Option<PathBuf>,

    /// Destination of mention links (overrides config).
    #[arg(long)]
    mention_href: Option<String>,
}

impl ConfigArgs {
    /// Load configuration with these arguments applied.
    pub(crate) fn load(self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            export_dir: self.export_dir,
            mention_href: self.mention_href,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
