//! Stateless proxy between the dashboard and NASA's public APIs.
//!
//! Which endpoints exist depends on the configured [`ApiVariant`]; the two
//! surfaces are never served together. Anything not matched by an endpoint
//! falls through to the static asset directory.

mod error;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::{ApiVariant, Config};
use crate::nasa::NasaClient;

/// Shared, read-only request context
pub struct ProxyState {
    pub nasa: NasaClient,
}

/// Build the proxy router for one API variant
pub fn router(variant: ApiVariant, state: Arc<ProxyState>, static_dir: Option<&Path>) -> Router {
    let app = match variant {
        ApiVariant::Photos => Router::new()
            .route("/rover/:name/manifest", get(routes::manifest))
            .route("/rover/:name/latest-photos", get(routes::latest_photos))
            .route("/rover/:name/photos/:sol", get(routes::photos_by_sol))
            .route("/apod", get(routes::apod)),
        ApiVariant::ImageSearch => Router::new()
            .route("/rover/:name/images", get(routes::images))
            .route("/asset/:nasa_id", get(routes::asset))
            .route("/metadata/:nasa_id", get(routes::metadata)),
    };

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Run the proxy until Ctrl+C / SIGTERM
pub async fn serve(config: &Config) -> Result<()> {
    let nasa = NasaClient::from_config(config).context("Failed to create NASA client")?;
    let state = Arc::new(ProxyState { nasa });

    let static_dir = Path::new(&config.server.static_dir);
    if !static_dir.is_dir() {
        tracing::warn!("Static directory {:?} not found, static assets will 404", static_dir);
    }

    let app = router(config.variant, state, Some(static_dir));

    let address = format!("0.0.0.0:{}", config.server.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(
        "Mars Rover Dashboard listening on port {}! ({} API)",
        config.server.port,
        config.variant.name()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Proxy server failed")?;

    tracing::info!("Proxy shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
