//! # Scan API
//!
//! Two surfaces:
//!
//! - `GET /v1/scan/{tag_id}?token=` is where a scanned code lands. The
//!   scan is recorded no matter what, then the request dispatches on the
//!   band's lifecycle status. A STOLEN band gets the same neutral message
//!   as an unknown code, so a thief learns nothing from the response.
//! - `POST /v1/scans` records a geolocation-bearing scan once the page
//!   has coordinate permission from the finder's browser.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use wardlink_core::{BandStatus, GeoPoint, TagId};
use wardlink_lifecycle::validate_token;
use wardlink_store::TxStore;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Neutral message for anything the finder should not learn more about:
/// unknown codes, failed tokens, deactivated bands, and stolen bands.
const GENERIC_REJECTION: &str = "This code is not recognized.";

/// Build the scan router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/scan/{tag_id}", get(scan_entry))
        .route("/v1/scans", post(record_scan))
}

// ── Requests & responses ────────────────────────────────────────────

/// Query parameters on the scan entry URL.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ScanQuery {
    /// The token embedded in the scanned code.
    pub token: Option<String>,
}

/// Where the scanned code leads next.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScanDispatch {
    /// FACTORY_LOCKED: not yet released.
    Unavailable { message: String },
    /// INACTIVE: proceed to the activation flow.
    Activate { band_id: String },
    /// ACTIVE: render the emergency view for this profile.
    Emergency { profile_id: Uuid },
    /// LOST: show the finder how to reach the owner.
    OwnerContact { name: String, phone: String },
    /// Everything else, including the STOLEN decoy.
    Rejected { message: String },
}

/// Coordinates reported by the scanning browser.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Request to record a geolocation-bearing scan.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordScanRequest {
    /// The band serial from the scanned code.
    pub band_id: String,
    /// Coordinates, if the finder granted permission.
    pub location: Option<GeoLocation>,
    /// Scanning browser's user agent; falls back to the request header.
    pub user_agent: Option<String>,
}

impl Validate for RecordScanRequest {
    fn validate(&self) -> Result<(), String> {
        if self.band_id.trim().is_empty() {
            return Err("band_id must be non-empty".to_string());
        }
        Ok(())
    }
}

/// Recorded scan acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecordScanResponse {
    pub success: bool,
    /// Identifier of the persisted scan event.
    pub scan_id: Uuid,
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /v1/scan/{tag_id} — Entry dispatch for a scanned code.
#[utoipa::path(
    get,
    path = "/v1/scan/{tag_id}",
    params(
        ("tag_id" = String, Path, description = "Band serial"),
        ("token" = Option<String>, Query, description = "Token from the scanned code"),
    ),
    responses(
        (status = 200, description = "Dispatch decision", body = ScanDispatch),
    ),
    tag = "scan"
)]
pub async fn scan_entry(
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
    Query(query): Query<ScanQuery>,
    headers: HeaderMap,
) -> Json<ScanDispatch> {
    // Every physical scan is recorded, whatever the dispatch decides.
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if let Err(err) = state.recorder.record_scan(&tag_id, None, user_agent).await {
        tracing::warn!(band_id = %tag_id, error = %err, "scan entry: recording failed");
    }

    let token = query.token.unwrap_or_default();
    let dispatch = match validate_token(state.store.as_ref(), &tag_id, &token) {
        Ok(validation) => dispatch_by_status(&state, &tag_id, validation.status),
        Err(reject) => {
            // Not-found, bad token, blocked (stolen or deactivated) and
            // malformed input all collapse into the one neutral message.
            tracing::info!(band_id = %tag_id, reason = %reject, "scan entry rejected");
            ScanDispatch::Rejected {
                message: GENERIC_REJECTION.to_string(),
            }
        }
    };
    Json(dispatch)
}

fn dispatch_by_status(state: &AppState, tag_id: &str, status: BandStatus) -> ScanDispatch {
    match status {
        BandStatus::FactoryLocked => ScanDispatch::Unavailable {
            message: "This band is not yet available.".to_string(),
        },
        BandStatus::Inactive => {
            let normalized = TagId::new(tag_id)
                .map(|id| id.as_str().to_string())
                .unwrap_or_else(|_| tag_id.to_string());
            ScanDispatch::Activate { band_id: normalized }
        }
        BandStatus::Active => match linked_profile(state, tag_id) {
            Some(profile_id) => ScanDispatch::Emergency { profile_id },
            None => ScanDispatch::Rejected {
                message: GENERIC_REJECTION.to_string(),
            },
        },
        BandStatus::Lost => match state.lifecycle.owner_contact(tag_id) {
            Ok(contact) => ScanDispatch::OwnerContact {
                name: contact.name,
                phone: contact.phone,
            },
            Err(_) => ScanDispatch::Rejected {
                message: "This band was reported lost.".to_string(),
            },
        },
        // Blocking statuses never reach here; the validator rejects them.
        BandStatus::Stolen | BandStatus::Deactivated => ScanDispatch::Rejected {
            message: GENERIC_REJECTION.to_string(),
        },
    }
}

fn linked_profile(state: &AppState, tag_id: &str) -> Option<Uuid> {
    let tag_id = TagId::new(tag_id).ok()?;
    let band = state.store.get_band(&tag_id).ok().flatten()?;
    band.linked_profile_id().map(|p| *p.as_uuid())
}

/// POST /v1/scans — Record a geolocation-bearing scan.
#[utoipa::path(
    post,
    path = "/v1/scans",
    request_body = RecordScanRequest,
    responses(
        (status = 200, description = "Scan recorded", body = RecordScanResponse),
        (status = 422, description = "Structurally invalid band serial", body = crate::error::ErrorBody),
    ),
    tag = "scan"
)]
pub async fn record_scan(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RecordScanRequest>, JsonRejection>,
) -> Result<Json<RecordScanResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let user_agent = req.user_agent.unwrap_or_else(|| {
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string()
    });
    let location = req.location.map(|l| GeoPoint { lat: l.lat, lng: l.lng });

    let scan_id = state
        .recorder
        .record_scan(&req.band_id, location, &user_agent)
        .await?;

    Ok(Json(RecordScanResponse {
        success: true,
        scan_id: *scan_id.as_uuid(),
    }))
}
