//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The band/profile store is the Phase 1 in-memory implementation behind
//! the `TxStore` seam; the scan log swaps to PostgreSQL when
//! `DATABASE_URL` is configured. Collaborators (push notifier, reverse
//! geocoder) are injected as trait objects so tests run against doubles.

use std::sync::Arc;

use wardlink_core::Notifier;
use wardlink_core::NullNotifier;
use wardlink_guard::{CredentialGate, RateLimiter};
use wardlink_lifecycle::Lifecycle;
use wardlink_scan::{GeoResolver, ScanRecorder};
use wardlink_store::{MemoryScanLog, MemoryStore, ScanLog};

/// Environment-driven configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// PostgreSQL URL; absent means the scan log stays in memory.
    pub database_url: Option<String>,
    /// Reverse-geocoding endpoint; absent disables place resolution.
    pub geocode_url: Option<String>,
    /// Hosts the geocoding client may talk to.
    pub geocode_allowed_hosts: Vec<String>,
}

impl AppConfig {
    /// Assemble configuration from the environment.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let database_url = std::env::var("DATABASE_URL").ok();
        let geocode_url = std::env::var("WARDLINK_GEOCODE_URL").ok();
        let geocode_allowed_hosts = std::env::var("WARDLINK_GEOCODE_ALLOWED_HOSTS")
            .map(|v| {
                v.split(',')
                    .map(|h| h.trim().to_string())
                    .filter(|h| !h.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            port,
            database_url,
            geocode_url,
            geocode_allowed_hosts,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The band/profile document store.
    pub store: Arc<MemoryStore>,
    /// Lifecycle operations (link, transfer, unlink, status).
    pub lifecycle: Arc<Lifecycle<MemoryStore>>,
    /// PIN verification.
    pub gate: Arc<CredentialGate<MemoryStore>>,
    /// Scan recording.
    pub recorder: Arc<ScanRecorder<MemoryStore>>,
}

impl AppState {
    /// Assemble the services over the given store, scan log, and
    /// collaborators.
    pub fn build(
        store: Arc<MemoryStore>,
        scan_log: Arc<dyn ScanLog>,
        geocoder: Option<Arc<dyn GeoResolver>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let lifecycle = Arc::new(Lifecycle::new(Arc::clone(&store), Arc::clone(&notifier)));
        let gate = Arc::new(CredentialGate::new(
            Arc::clone(&store),
            RateLimiter::default(),
        ));
        let recorder = Arc::new(ScanRecorder::new(
            Arc::clone(&store),
            scan_log,
            geocoder,
            notifier,
        ));
        Self {
            store,
            lifecycle,
            gate,
            recorder,
        }
    }

    /// Fully in-memory state with no external collaborators. Used in
    /// development and tests.
    pub fn in_memory() -> Self {
        Self::build(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryScanLog::new()),
            None,
            Arc::new(NullNotifier),
        )
    }
}
