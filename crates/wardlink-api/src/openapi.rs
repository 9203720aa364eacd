//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI spec served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wardlink API",
        version = "0.1.0",
        description = "Band lifecycle, scan recording, and emergency-view credential gating for guardian-managed identity bands.\n\nProvides:\n- **Scan entry dispatch** routing a scanned code by band status\n- **Token validation** proving a scanned code is genuine\n- **Lifecycle operations**: link, transfer, unlink, status reports\n- **PIN verification** with fixed-window brute-force protection\n- **Owner contact** surface for bands reported lost",
        license(name = "Apache-2.0")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::scan::scan_entry,
        crate::routes::scan::record_scan,
        crate::routes::bands::validate,
        crate::routes::bands::link,
        crate::routes::bands::transfer,
        crate::routes::bands::unlink,
        crate::routes::bands::get_band,
        crate::routes::bands::update_status,
        crate::routes::bands::owner_contact,
        crate::routes::profiles::verify_pin,
    ),
    tags(
        (name = "scan", description = "Scan entry dispatch and recording"),
        (name = "bands", description = "Token validation and lifecycle operations"),
        (name = "profiles", description = "Credential gate"),
    )
)]
pub struct ApiDoc;

/// Serve the generated document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
