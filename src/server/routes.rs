//! Proxy endpoint handlers.
//!
//! Each handler forwards to exactly one upstream call and either relays the JSON
//! body or answers 500 with a fixed message. The photos handlers answer with
//! `{error}` only; the image library handlers add `{details}`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use super::ProxyState;
use super::error::ProxyError;
use crate::nasa::UpstreamError;

pub const MANIFEST_ERROR: &str = "Failed to fetch rover manifest";
pub const PHOTOS_ERROR: &str = "Failed to fetch rover photos";
pub const APOD_ERROR: &str = "Failed to fetch APOD";
pub const IMAGES_ERROR: &str = "Failed to fetch rover images";
pub const ASSET_ERROR: &str = "Failed to fetch asset";
pub const METADATA_ERROR: &str = "Failed to fetch metadata";

type ProxyResult = Result<Json<Value>, ProxyError>;

/// Relay an upstream result, logging and translating failures
fn relay(result: Result<Value, UpstreamError>, what: &str, message: &'static str, details: bool) -> ProxyResult {
    result.map(Json).map_err(|e| {
        tracing::error!("Error fetching {}: {}", what, e);
        if details {
            ProxyError::with_details(message, &e)
        } else {
            ProxyError::new(message)
        }
    })
}

/// `GET /rover/:name/manifest`
pub async fn manifest(State(state): State<Arc<ProxyState>>, Path(name): Path<String>) -> ProxyResult {
    relay(state.nasa.manifest(&name).await, "manifest", MANIFEST_ERROR, false)
}

/// `GET /rover/:name/latest-photos`
pub async fn latest_photos(State(state): State<Arc<ProxyState>>, Path(name): Path<String>) -> ProxyResult {
    relay(state.nasa.latest_photos(&name).await, "photos", PHOTOS_ERROR, false)
}

/// `GET /rover/:name/photos/:sol`
pub async fn photos_by_sol(
    State(state): State<Arc<ProxyState>>,
    Path((name, sol)): Path<(String, String)>,
) -> ProxyResult {
    relay(
        state.nasa.photos_by_sol(&name, &sol).await,
        "photos by sol",
        PHOTOS_ERROR,
        false,
    )
}

/// `GET /apod`, wrapped as `{image: ...}`
pub async fn apod(State(state): State<Arc<ProxyState>>) -> ProxyResult {
    let image = relay(state.nasa.apod().await, "APOD", APOD_ERROR, false)?;
    Ok(Json(json!({ "image": image.0 })))
}

/// `GET /rover/:name/images`
pub async fn images(State(state): State<Arc<ProxyState>>, Path(name): Path<String>) -> ProxyResult {
    relay(state.nasa.search_images(&name).await, "rover images", IMAGES_ERROR, true)
}

/// `GET /asset/:nasa_id`
pub async fn asset(State(state): State<Arc<ProxyState>>, Path(nasa_id): Path<String>) -> ProxyResult {
    relay(state.nasa.asset(&nasa_id).await, "asset", ASSET_ERROR, true)
}

/// `GET /metadata/:nasa_id`
pub async fn metadata(State(state): State<Arc<ProxyState>>, Path(nasa_id): Path<String>) -> ProxyResult {
    relay(state.nasa.metadata(&nasa_id).await, "metadata", METADATA_ERROR, true)
}
