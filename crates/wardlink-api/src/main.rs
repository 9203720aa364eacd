//! # wardlink-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to a configurable port (default
//! 8080); `DATABASE_URL` enables the PostgreSQL scan log, and
//! `WARDLINK_GEOCODE_URL` + `WARDLINK_GEOCODE_ALLOWED_HOSTS` enable
//! reverse geocoding of scan locations.

use std::sync::Arc;

use wardlink_api::state::{AppConfig, AppState};
use wardlink_core::{Notifier, NullNotifier};
use wardlink_scan::{GeoResolver, HttpReverseGeocoder};
use wardlink_store::{MemoryScanLog, MemoryStore, ScanLog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    // Scan log: PostgreSQL when configured, in-memory otherwise.
    let scan_log: Arc<dyn ScanLog> = match wardlink_api::db::init_pool().await.map_err(|err| {
        tracing::error!("database initialization failed: {err}");
        err
    })? {
        Some(pool) => Arc::new(wardlink_api::db::PgScanLog::new(pool)),
        None => Arc::new(MemoryScanLog::new()),
    };

    // Reverse geocoder: only against an allow-listed host.
    let geocoder: Option<Arc<dyn GeoResolver>> = match &config.geocode_url {
        Some(url) => match HttpReverseGeocoder::new(url, &config.geocode_allowed_hosts) {
            Ok(geocoder) => {
                tracing::info!("reverse geocoding enabled");
                Some(Arc::new(geocoder))
            }
            Err(err) => {
                tracing::error!("geocoder rejected: {err}");
                return Err(err.into());
            }
        },
        None => {
            tracing::warn!("WARDLINK_GEOCODE_URL not set, scan places will not be resolved");
            None
        }
    };

    // Push transport integration arrives with the device-token registry;
    // until then notifications are logged and dropped.
    let notifier: Arc<dyn Notifier> = Arc::new(NullNotifier);

    let state = AppState::build(Arc::new(MemoryStore::new()), scan_log, geocoder, notifier);
    let app = wardlink_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Wardlink API listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
