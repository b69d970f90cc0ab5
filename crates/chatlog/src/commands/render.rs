//! `chatlog render` command implementation.

use std::io::Read;

use chatlog_directory::Directory;
use chatlog_markup::Renderer;
use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Message text (default: read from stdin).
    text: Option<String>,

    /// Render without loading an export; every mention is then unknown.
    #[arg(long)]
    no_export: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the export cannot be loaded or a mention is
    /// unknown.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let text = match self.text {
            Some(text) => text,
            None => read_stdin()?,
        };
        let config = self.config.load()?;

        let directory = if self.no_export {
            Directory::new()
        } else {
            Directory::load_export(&config.export_resolved.dir)?
        };

        let html = Renderer::new(config.render_options()).render(&text, &directory)?;
        Output::new().print(&html)?;
        Ok(())
    }
}

/// Read a message from stdin, dropping the trailing newline.
fn read_stdin() -> std::io::Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    let len = text.trim_end_matches(['\r', '\n']).len();
    text.truncate(len);
    Ok(text)
}
