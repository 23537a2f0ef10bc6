//! In-process HTTP fixtures shared by the proxy and dashboard tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::config::ApiVariant;
use crate::nasa::NasaClient;
use crate::server::{self, ProxyState};

/// Rover name that makes every stub endpoint fail
pub const BROKEN: &str = "broken";

/// Rover name whose stub responses are delayed by [`SLOW_DELAY`]
pub const SLOW: &str = "slow";

pub const SLOW_DELAY: Duration = Duration::from_millis(300);

/// Rover name or asset id whose stub responses are 200 with a non-JSON body
pub const GARBLED: &str = "garbled";

/// Serve a router on an ephemeral localhost port, returning its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", address)
}

/// Send one GET through a router, returning status and JSON body (Null if not JSON)
pub async fn oneshot_get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

type Seen = Arc<Mutex<Vec<String>>>;

/// A NASA look-alike that records every request it receives
pub struct StubUpstream {
    pub base: String,
    seen: Seen,
}

impl StubUpstream {
    pub async fn start() -> Self {
        let seen: Seen = Arc::default();

        let router = Router::new()
            .route("/mars-photos/api/v1/manifests/:rover", get(stub_manifest))
            .route("/mars-photos/api/v1/rovers/:rover/latest_photos", get(stub_latest_photos))
            .route("/mars-photos/api/v1/rovers/:rover/photos", get(stub_photos_by_sol))
            .route("/planetary/apod", get(stub_apod))
            .route("/search", get(stub_search))
            .route("/asset/:id", get(stub_asset))
            .route("/metadata/:id", get(stub_metadata))
            .with_state(seen.clone());

        let base = spawn(router).await;
        Self { base, seen }
    }

    /// Path and query of every request received so far
    pub fn requests(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

/// A proxy router for `variant` pointed at the stub upstream
pub fn proxy_router(variant: ApiVariant, upstream: &StubUpstream) -> Router {
    let nasa = NasaClient::new(&upstream.base, &upstream.base, "TESTKEY").unwrap();
    server::router(variant, Arc::new(ProxyState { nasa }), None)
}

/// Start a stub upstream plus a real proxy in front of it, returning the proxy URL
pub async fn spawn_proxy(variant: ApiVariant) -> (StubUpstream, String) {
    let upstream = StubUpstream::start().await;
    let proxy = spawn(proxy_router(variant, &upstream)).await;
    (upstream, proxy)
}

fn record(seen: &Seen, uri: &Uri) {
    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
    seen.lock().unwrap().push(path.to_string());
}

fn upstream_failure(status: StatusCode) -> Response {
    (status, Json(json!({ "error": "secret upstream diagnostics" }))).into_response()
}

fn garbled() -> Response {
    (StatusCode::OK, "<html>not json</html>").into_response()
}

fn display_name(rover: &str) -> String {
    let mut chars = rover.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

async fn stub_manifest(State(seen): State<Seen>, Path(rover): Path<String>, uri: Uri) -> Response {
    record(&seen, &uri);
    if rover == BROKEN {
        return upstream_failure(StatusCode::SERVICE_UNAVAILABLE);
    }
    if rover == GARBLED {
        return garbled();
    }
    if rover == SLOW {
        tokio::time::sleep(SLOW_DELAY).await;
    }

    Json(json!({
        "photo_manifest": {
            "name": display_name(&rover),
            "status": "Active",
            "launch_date": "2011-11-26",
            "landing_date": "2012-08-06",
            "max_sol": 4102,
            "max_date": "2024-02-19",
            "total_photos": 695670
        }
    }))
    .into_response()
}

async fn stub_latest_photos(State(seen): State<Seen>, Path(rover): Path<String>, uri: Uri) -> Response {
    record(&seen, &uri);
    if rover == BROKEN {
        return upstream_failure(StatusCode::BAD_GATEWAY);
    }
    if rover == GARBLED {
        return garbled();
    }
    if rover == SLOW {
        tokio::time::sleep(SLOW_DELAY).await;
    }

    Json(json!({
        "latest_photos": [{
            "id": 1,
            "sol": 4102,
            "img_src": format!("https://mars.nasa.gov/{}/0001.jpg", rover),
            "earth_date": "2024-02-19",
            "camera": { "name": "MAST", "full_name": "Mast Camera" },
            "rover": { "name": display_name(&rover) }
        }]
    }))
    .into_response()
}

async fn stub_photos_by_sol(
    State(seen): State<Seen>,
    Path(rover): Path<String>,
    Query(query): Query<std::collections::HashMap<String, String>>,
    uri: Uri,
) -> Response {
    record(&seen, &uri);
    let sol: u64 = query.get("sol").and_then(|s| s.parse().ok()).unwrap_or(0);
    Json(json!({
        "photos": [{ "id": 7, "sol": sol, "rover": { "name": display_name(&rover) } }]
    }))
    .into_response()
}

async fn stub_apod(State(seen): State<Seen>, uri: Uri) -> Response {
    record(&seen, &uri);
    Json(json!({ "title": "Pillars of Creation", "media_type": "image" })).into_response()
}

async fn stub_search(
    State(seen): State<Seen>,
    Query(query): Query<std::collections::HashMap<String, String>>,
    uri: Uri,
) -> Response {
    record(&seen, &uri);
    let q = query.get("q").cloned().unwrap_or_default();
    if q.starts_with(BROKEN) {
        return upstream_failure(StatusCode::INTERNAL_SERVER_ERROR);
    }
    if q.starts_with(GARBLED) {
        return garbled();
    }
    if q.starts_with(SLOW) {
        tokio::time::sleep(SLOW_DELAY).await;
    }

    Json(json!({
        "collection": {
            "metadata": { "total_hits": 2 },
            "items": [
                {
                    "data": [{ "title": format!("{} selfie", q), "description": "A self-portrait.", "date_created": "2021-04-06T00:00:00Z" }],
                    "links": [{ "href": "https://images-assets.nasa.gov/image/PIA1/PIA1~thumb.jpg", "render": "image" }]
                },
                {
                    "data": [{}]
                }
            ]
        }
    }))
    .into_response()
}

async fn stub_asset(State(seen): State<Seen>, Path(id): Path<String>, uri: Uri) -> Response {
    record(&seen, &uri);
    if id == "missing" {
        return upstream_failure(StatusCode::NOT_FOUND);
    }
    if id == GARBLED {
        return garbled();
    }
    Json(json!({
        "collection": { "items": [{ "href": format!("https://images-assets.nasa.gov/image/{id}/{id}~orig.jpg") }] }
    }))
    .into_response()
}

async fn stub_metadata(State(seen): State<Seen>, Path(id): Path<String>, uri: Uri) -> Response {
    record(&seen, &uri);
    Json(json!({ "location": format!("https://images-assets.nasa.gov/image/{id}/metadata.json") })).into_response()
}
