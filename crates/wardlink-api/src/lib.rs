//! # wardlink-api — Axum API Surface
//!
//! The HTTP layer over the Wardlink core. Route handlers shape requests
//! and responses; every business decision lives in the domain crates.
//!
//! ## API Surface
//!
//! | Route                                  | Module               |
//! |----------------------------------------|----------------------|
//! | `GET  /v1/scan/{tag_id}`               | [`routes::scan`]     |
//! | `POST /v1/scans`                       | [`routes::scan`]     |
//! | `POST /v1/bands/validate`              | [`routes::bands`]    |
//! | `POST /v1/bands/link`                  | [`routes::bands`]    |
//! | `POST /v1/bands/transfer`              | [`routes::bands`]    |
//! | `POST /v1/bands/unlink`                | [`routes::bands`]    |
//! | `GET  /v1/bands/{tag_id}`              | [`routes::bands`]    |
//! | `POST /v1/bands/{tag_id}/status`       | [`routes::bands`]    |
//! | `GET  /v1/bands/{tag_id}/owner-contact`| [`routes::bands`]    |
//! | `POST /v1/profiles/{id}/verify-pin`    | [`routes::profiles`] |
//! | `GET  /health/live`, `/health/ready`   | here                 |
//! | `GET  /openapi.json`                   | [`openapi`]          |
//!
//! ## Crate Policy
//!
//! - No business logic in handlers; they delegate to the domain crates.
//! - All errors map to structured responses via [`AppError`].
//! - Any band returned to a client goes through the stripped projection;
//!   the secret token cannot appear on a read path.

pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health/live", get(|| async { "ok" }))
        .route("/health/ready", get(|| async { "ok" }))
        .merge(routes::scan::router())
        .merge(routes::bands::router())
        .merge(routes::profiles::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
