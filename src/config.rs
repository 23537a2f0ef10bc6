use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ui::theme::ThemePreset;

/// Environment variable holding the NASA API key
pub const API_KEY_VAR: &str = "API_KEY";

/// Environment variable overriding the proxy port
pub const PORT_VAR: &str = "PORT";

/// NASA's shared demo key, used when no key is configured
const DEMO_KEY: &str = "DEMO_KEY";

/// Which upstream API surface the proxy exposes and the client consumes.
///
/// The two surfaces are mutually exclusive deployments of the same proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ApiVariant {
    /// Mars Rover Photos API: manifest, latest photos, photos by sol, APOD
    #[default]
    Photos,
    /// NASA Image and Video Library: search, asset, metadata
    ImageSearch,
}

impl ApiVariant {
    /// Rovers offered when the config does not list any
    pub fn default_rovers(&self) -> Vec<String> {
        let rovers: &[&str] = match self {
            ApiVariant::Photos => &["Curiosity", "Opportunity", "Spirit"],
            ApiVariant::ImageSearch => &["Curiosity", "Opportunity", "Spirit", "Perseverance"],
        };
        rovers.iter().map(|r| r.to_string()).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApiVariant::Photos => "photos",
            ApiVariant::ImageSearch => "image-search",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub variant: ApiVariant,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Proxy server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the proxy listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for static assets
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Base URL of api.nasa.gov
    #[serde(default = "default_nasa_api_base")]
    pub nasa_api_base: String,
    /// Base URL of the image and video library
    #[serde(default = "default_images_api_base")]
    pub images_api_base: String,
    /// NASA API key. Normally taken from the environment rather than the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
            nasa_api_base: default_nasa_api_base(),
            images_api_base: default_images_api_base(),
            api_key: None,
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_nasa_api_base() -> String {
    "https://api.nasa.gov".to_string()
}

fn default_images_api_base() -> String {
    "https://images-api.nasa.gov".to_string()
}

/// Dashboard client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Where the proxy is reachable
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    /// Rover tabs, in display order. Empty means the variant's defaults.
    #[serde(default)]
    pub rovers: Vec<String>,
    /// Rover selected on startup
    #[serde(default = "default_initial_rover")]
    pub initial_rover: String,
    /// Name shown in the header greeting
    #[serde(default = "default_user_name")]
    pub user_name: String,
    /// Color theme
    #[serde(default)]
    pub theme: ThemePreset,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            rovers: Vec::new(),
            initial_rover: default_initial_rover(),
            user_name: default_user_name(),
            theme: ThemePreset::default(),
        }
    }
}

fn default_proxy_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_initial_rover() -> String {
    "Curiosity".to_string()
}

fn default_user_name() -> String {
    "Explorer".to_string()
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("gov", "rover-dashboard", "RoverDashboard")
            .context("Could not determine config directory")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply `API_KEY` and `PORT` overrides from the given lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            self.server.api_key = Some(key);
        }

        if let Some(port) = lookup(PORT_VAR) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("Invalid {} value {:?}: {}", PORT_VAR, port, e),
            }
        }
    }

    /// The NASA API key to attach to upstream requests
    pub fn api_key(&self) -> String {
        match &self.server.api_key {
            Some(key) => key.clone(),
            None => {
                tracing::warn!("{} not set, falling back to {}", API_KEY_VAR, DEMO_KEY);
                DEMO_KEY.to_string()
            }
        }
    }

    /// Rover tabs for the configured variant
    pub fn rovers(&self) -> Vec<String> {
        if self.client.rovers.is_empty() {
            self.variant.default_rovers()
        } else {
            self.client.rovers.clone()
        }
    }

    /// Initial rover, falling back to the first tab when the configured one isn't offered
    pub fn initial_rover(&self) -> String {
        let rovers = self.rovers();
        if rovers.iter().any(|r| r == &self.client.initial_rover) {
            self.client.initial_rover.clone()
        } else {
            rovers.into_iter().next().unwrap_or_else(default_initial_rover)
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}
