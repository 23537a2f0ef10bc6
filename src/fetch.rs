//! Dashboard side of the proxy: an HTTP client for the proxy endpoints and the
//! fetch coordinator that turns one rover selection into one [`RoverData`].

use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ApiVariant;

/// User agent for proxy requests
const USER_AGENT: &str = concat!("rover-dashboard/", env!("CARGO_PKG_VERSION"));

/// Failure fetching from the proxy
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid proxy URL {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch {url}: {status}")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Payload cached per rover. The JSON inside is upstream's and is only ever
/// read defensively.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RoverData {
    /// Manifest and latest photos, joined from two parallel requests
    Photos {
        photo_manifest: Value,
        latest_photos: Value,
    },
    /// One image library search response
    Search(Value),
}

impl RoverData {
    /// Join the manifest and latest-photos responses into one payload
    pub fn combine(manifest: Value, photos: Value) -> Self {
        let field = |mut v: Value, key: &str| v.get_mut(key).map(Value::take).unwrap_or(Value::Null);
        RoverData::Photos {
            photo_manifest: field(manifest, "photo_manifest"),
            latest_photos: field(photos, "latest_photos"),
        }
    }
}

/// HTTP client for the proxy
#[derive(Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base: Url,
}

impl ProxyClient {
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base).map_err(|_| FetchError::InvalidUrl(base.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base.to_string()));
        }

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, base })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Value, FetchError> {
        let url = self.url(segments);
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }

    pub async fn manifest(&self, rover: &str) -> Result<Value, FetchError> {
        self.get_json(&["rover", &rover.to_lowercase(), "manifest"]).await
    }

    pub async fn latest_photos(&self, rover: &str) -> Result<Value, FetchError> {
        self.get_json(&["rover", &rover.to_lowercase(), "latest-photos"]).await
    }

    pub async fn photos_by_sol(&self, rover: &str, sol: u32) -> Result<Value, FetchError> {
        self.get_json(&["rover", &rover.to_lowercase(), "photos", &sol.to_string()])
            .await
    }

    pub async fn apod(&self) -> Result<Value, FetchError> {
        self.get_json(&["apod"]).await
    }

    pub async fn images(&self, rover: &str) -> Result<Value, FetchError> {
        self.get_json(&["rover", &rover.to_lowercase(), "images"]).await
    }

    pub async fn asset(&self, nasa_id: &str) -> Result<Value, FetchError> {
        self.get_json(&["asset", nasa_id]).await
    }

    pub async fn metadata(&self, nasa_id: &str) -> Result<Value, FetchError> {
        self.get_json(&["metadata", nasa_id]).await
    }
}

/// Fetch everything the dashboard shows for one rover.
///
/// The photos variant issues the manifest and latest-photos requests in
/// parallel and only succeeds if both do; a partial result is dropped.
pub async fn fetch_rover(client: &ProxyClient, variant: ApiVariant, rover: &str) -> Result<RoverData, FetchError> {
    let start = std::time::Instant::now();

    let data = match variant {
        ApiVariant::Photos => {
            let (manifest, photos) = tokio::try_join!(client.manifest(rover), client.latest_photos(rover))?;
            RoverData::combine(manifest, photos)
        }
        ApiVariant::ImageSearch => RoverData::Search(client.images(rover).await?),
    };

    tracing::info!("Fetched {} data in {:.1}s", rover, start.elapsed().as_secs_f32());
    Ok(data)
}

/// Message shown to the user when [`fetch_rover`] fails
pub fn failure_message(variant: ApiVariant) -> &'static str {
    match variant {
        ApiVariant::Photos => "Failed to load rover data. Please try again.",
        ApiVariant::ImageSearch => "Failed to load rover images. Please try again.",
    }
}
