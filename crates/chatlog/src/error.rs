//! CLI error types.

use chatlog_config::ConfigError;
use chatlog_directory::ExportError;
use chatlog_markup::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Render(#[from] RenderError),
}
