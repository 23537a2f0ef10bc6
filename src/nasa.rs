//! NASA API client used by the proxy.
//!
//! Two upstream hosts are covered:
//!
//! - **api.nasa.gov**: Mars Rover Photos (manifests, latest photos, photos by sol) and APOD
//! - **images-api.nasa.gov**: the Image and Video Library (search, asset, metadata)
//!
//! Every request carries the configured `api_key`. Bodies are returned as opaque
//! JSON; the dashboard reads them defensively and the proxy relays them untouched.

use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;

/// User agent for upstream requests
const USER_AGENT: &str = concat!("rover-dashboard/", env!("CARGO_PKG_VERSION"));

/// Mars Rover Photos API path prefix
const MARS_PHOTOS: [&str; 3] = ["mars-photos", "api", "v1"];

/// Failure talking to a NASA API
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("API request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// NASA API client
#[derive(Clone)]
pub struct NasaClient {
    client: reqwest::Client,
    api_base: Url,
    images_base: Url,
    api_key: String,
}

impl NasaClient {
    /// Create a client for the given upstream bases
    pub fn new(api_base: &str, images_base: &str, api_key: impl Into<String>) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_base: parse_base(api_base)?,
            images_base: parse_base(images_base)?,
            api_key: api_key.into(),
        })
    }

    /// Create a client from the `[server]` section of the configuration
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Self::new(
            &config.server.nasa_api_base,
            &config.server.images_api_base,
            config.api_key(),
        )
    }

    /// Build an upstream URL: base + path segments + query, with `api_key` appended.
    ///
    /// Segments are percent-encoded individually, so a rover name or asset id can
    /// never escape its path position.
    fn endpoint(&self, base: &Url, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }

    fn mars_photos(&self, tail: &[&str], query: &[(&str, &str)]) -> Url {
        let mut segments: Vec<&str> = MARS_PHOTOS.to_vec();
        segments.extend_from_slice(tail);
        self.endpoint(&self.api_base, &segments, query)
    }

    pub fn manifest_url(&self, rover: &str) -> Url {
        self.mars_photos(&["manifests", &rover.to_lowercase()], &[])
    }

    pub fn latest_photos_url(&self, rover: &str) -> Url {
        self.mars_photos(&["rovers", &rover.to_lowercase(), "latest_photos"], &[])
    }

    pub fn photos_by_sol_url(&self, rover: &str, sol: &str) -> Url {
        self.mars_photos(&["rovers", &rover.to_lowercase(), "photos"], &[("sol", sol)])
    }

    pub fn apod_url(&self) -> Url {
        self.endpoint(&self.api_base, &["planetary", "apod"], &[])
    }

    pub fn search_url(&self, rover: &str) -> Url {
        let query = format!("{} rover", rover.to_lowercase());
        self.endpoint(
            &self.images_base,
            &["search"],
            &[("q", &query), ("media_type", "image")],
        )
    }

    pub fn asset_url(&self, nasa_id: &str) -> Url {
        self.endpoint(&self.images_base, &["asset", nasa_id], &[])
    }

    pub fn metadata_url(&self, nasa_id: &str) -> Url {
        self.endpoint(&self.images_base, &["metadata", nasa_id], &[])
    }

    /// Perform one GET and parse the body as JSON. Non-2xx is an error and the
    /// body is dropped unread.
    ///
    /// Transport and decode errors have their URL stripped, since it carries `api_key`.
    async fn get_json(&self, url: Url) -> Result<Value, UpstreamError> {
        tracing::debug!("GET {}", redact(&url));

        let response = self.client.get(url).send().await.map_err(strip_url)?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }

        response.json().await.map_err(strip_url)
    }

    /// Mission manifest for a rover (`{photo_manifest: {...}}`)
    pub async fn manifest(&self, rover: &str) -> Result<Value, UpstreamError> {
        self.get_json(self.manifest_url(rover)).await
    }

    /// Most recent photos for a rover (`{latest_photos: [...]}`)
    pub async fn latest_photos(&self, rover: &str) -> Result<Value, UpstreamError> {
        self.get_json(self.latest_photos_url(rover)).await
    }

    /// Photos taken on a given sol (`{photos: [...]}`)
    pub async fn photos_by_sol(&self, rover: &str, sol: &str) -> Result<Value, UpstreamError> {
        self.get_json(self.photos_by_sol_url(rover, sol)).await
    }

    /// Astronomy Picture of the Day
    pub async fn apod(&self) -> Result<Value, UpstreamError> {
        self.get_json(self.apod_url()).await
    }

    /// Image library search for a rover
    pub async fn search_images(&self, rover: &str) -> Result<Value, UpstreamError> {
        self.get_json(self.search_url(rover)).await
    }

    /// Media files of one image library asset
    pub async fn asset(&self, nasa_id: &str) -> Result<Value, UpstreamError> {
        self.get_json(self.asset_url(nasa_id)).await
    }

    /// Metadata location of one image library asset
    pub async fn metadata(&self, nasa_id: &str) -> Result<Value, UpstreamError> {
        self.get_json(self.metadata_url(nasa_id)).await
    }
}

fn strip_url(e: reqwest::Error) -> UpstreamError {
    UpstreamError::Request(e.without_url())
}

fn parse_base(raw: &str) -> Result<Url, UpstreamError> {
    let url = Url::parse(raw).map_err(|e| UpstreamError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(UpstreamError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "not a hierarchical URL".to_string(),
        });
    }

    Ok(url)
}

/// Strip the API key from a URL before it reaches the logs
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "api_key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    shown.set_query(None);
    if !pairs.is_empty() {
        shown.query_pairs_mut().extend_pairs(pairs);
    }
    shown.to_string()
}
