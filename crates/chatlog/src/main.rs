//! chatlog CLI - chat archive renderer.
//!
//! Provides commands for:
//! - `render`: Render one message to HTML
//! - `channels`: List channels of an export
//! - `channel`: Render every message of a channel
//! - `search`: Find messages by text, or show the context of a message

mod commands;
mod error;
mod html;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ChannelArgs, ChannelsArgs, RenderArgs, SearchArgs};
use output::Output;

/// chatlog - chat archive renderer.
#[derive(Parser)]
#[command(name = "chatlog", version, about)]
struct Cli {
    /// Enable verbose output (export loading and skipped messages).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a message from the argument or stdin.
    Render(RenderArgs),
    /// List channels.
    Channels(ChannelsArgs),
    /// Render all messages of a channel, newest first.
    Channel(ChannelArgs),
    /// Search messages, or show messages around one.
    Search(SearchArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Channels(args) => args.execute(),
        Commands::Channel(args) => args.execute(),
        Commands::Search(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
