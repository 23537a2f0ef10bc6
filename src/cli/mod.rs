//! CLI module for the rover dashboard
//!
//! Running without a subcommand opens the GUI; everything else is headless.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{ApiVariant, Config};

pub use output::{OutputFormat, print_error};

/// Mars Rover Dashboard - NASA rover data viewer and proxy
#[derive(Parser, Debug)]
#[command(name = "rover-dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the dashboard window (default)
    Gui,

    /// Run the NASA proxy and serve static assets
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Which API surface to expose
        #[arg(long, value_enum)]
        variant: Option<ApiVariant>,
    },

    /// Query a running proxy
    Fetch {
        /// Proxy base URL (defaults to the configured one)
        #[arg(long, global = true)]
        proxy: Option<String>,

        #[command(subcommand)]
        command: commands::fetch::FetchCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run a headless command. `Gui` is handled by the caller.
pub async fn run(command: Commands, output: &OutputOptions) -> Result<()> {
    let format = output.format();

    match command {
        Commands::Gui => anyhow::bail!("The GUI is not a headless command"),
        Commands::Serve { port, variant } => {
            let mut config = Config::load()?;
            apply_serve_overrides(&mut config, port, variant);
            crate::server::serve(&config).await
        }
        Commands::Fetch { proxy, command } => commands::fetch::run(command, proxy, format).await,
        Commands::Config { command } => commands::config::run(command, format, output.quiet).await,
    }
}

fn apply_serve_overrides(config: &mut Config, port: Option<u16>, variant: Option<ApiVariant>) {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(variant) = variant {
        config.variant = variant;
    }
}
