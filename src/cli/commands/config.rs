//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration, environment overrides included
    Show,

    /// Show config file path
    Path,

    /// Write the default configuration file if none exists
    Init,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Path => path(format),
        ConfigCommands::Init => init(quiet),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let mut config = Config::load()?;
    // Never echo the key itself
    if config.server.api_key.is_some() {
        config.server.api_key = Some("<set>".to_string());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists: path.exists(),
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    })
}

fn init(quiet: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    Config::default().save()?;
    print_success(&format!("Wrote {}", path.display()), quiet);
    Ok(())
}
