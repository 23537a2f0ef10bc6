mod app;
mod app_data;
mod cli;
mod config;
mod fetch;
mod nasa;
mod server;
mod state;
mod task;
#[cfg(test)]
mod test_support;
mod ui;
mod util;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::state::Dashboard;

/// Open the dashboard window. Blocks until it is closed.
fn run_gui() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load config, using defaults: {:#}", e);
        Config::default()
    });
    let dashboard = Dashboard::new(&config).context("Failed to create dashboard")?;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 800.0])
        .with_min_inner_size([640.0, 480.0])
        .with_title("Mars Rover Dashboard");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Mars Rover Dashboard",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::DashboardApp::new(cc, &config, dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "rover_dashboard=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Gui) => {
            tracing::info!("Starting Mars Rover Dashboard");
            run_gui()
        }
        Some(command) => {
            if let Err(e) = cli::run(command, &cli.output).await {
                cli::print_error(&format!("{:#}", e));
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
