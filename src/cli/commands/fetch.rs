//! Headless client for a running proxy

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;

use crate::cli::output::{OutputFormat, format_facts, print_formatted};
use crate::config::{ApiVariant, Config};
use crate::fetch::{self, ProxyClient, RoverData};
use crate::view::{self, Gallery};

#[derive(Subcommand, Debug)]
pub enum FetchCommands {
    /// Fetch a rover the way the dashboard does and summarize it
    Show {
        /// Rover name, e.g. Curiosity
        rover: String,
    },

    /// Mission manifest for a rover
    Manifest { rover: String },

    /// Latest photos for a rover
    Latest { rover: String },

    /// Photos taken on one sol
    Sol { rover: String, sol: u32 },

    /// Astronomy Picture of the Day
    Apod,

    /// Image library search for a rover
    Images { rover: String },

    /// Asset manifest for an image library item
    Asset { nasa_id: String },

    /// Metadata location for an image library item
    Metadata { nasa_id: String },
}

pub async fn run(command: FetchCommands, proxy: Option<String>, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let base = proxy.unwrap_or_else(|| config.client.proxy_url.clone());
    let client = ProxyClient::new(&base).with_context(|| format!("Invalid proxy URL {}", base))?;

    let raw = match command {
        FetchCommands::Show { rover } => return show(&client, config.variant, &rover, format).await,
        FetchCommands::Manifest { rover } => client.manifest(&rover).await,
        FetchCommands::Latest { rover } => client.latest_photos(&rover).await,
        FetchCommands::Sol { rover, sol } => client.photos_by_sol(&rover, sol).await,
        FetchCommands::Apod => client.apod().await,
        FetchCommands::Images { rover } => client.images(&rover).await,
        FetchCommands::Asset { nasa_id } => client.asset(&nasa_id).await,
        FetchCommands::Metadata { nasa_id } => client.metadata(&nasa_id).await,
    };
    let raw = raw.context("Proxy request failed")?;

    // Raw upstream payloads have no text rendering of their own
    print_formatted(&raw, format, |v: &Value| serde_json::to_string_pretty(v).unwrap_or_default())
}

async fn show(client: &ProxyClient, variant: ApiVariant, rover: &str, format: OutputFormat) -> Result<()> {
    let data = fetch::fetch_rover(client, variant, rover)
        .await
        .with_context(|| fetch::failure_message(variant))?;

    print_formatted(&data, format, |data| summarize(rover, data))
}

/// Text rendering of a fetched rover, built from the same view tree the GUI paints
pub fn summarize(rover: &str, data: &RoverData) -> String {
    let info = view::rover_info(rover, data);
    let mut lines = vec![info.heading.clone()];

    if let Some(description) = &info.description {
        lines.push(format!("  {}", description));
    }
    if !info.facts.is_empty() {
        lines.push(format_facts(&info.facts, 2));
    }
    lines.push(String::new());

    match view::image_gallery(rover, data) {
        Gallery::Empty(message) => lines.push(message),
        Gallery::Items { heading, items } => {
            lines.push(format!("{} ({})", heading, items.len()));
            for item in items {
                let label = item.title.as_deref().unwrap_or(&item.alt);
                match &item.image_url {
                    Some(url) => lines.push(format!("  - {}: {}", label, url)),
                    None => lines.push(format!("  - {}", label)),
                }
            }
        }
    }

    lines.join("\n")
}
