//! # Band Operations API
//!
//! Token validation, the lifecycle state machine (link, transfer, unlink,
//! status reports), the stripped band read path, and the LOST-mode owner
//! contact surface.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use wardlink_core::{BandStatus, BandView, GuardianId, ProfileId, TagId};
use wardlink_lifecycle::validate_token;
use wardlink_store::TxStore;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::OpResponse;
use crate::state::AppState;

/// Build the bands router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/bands/validate", post(validate))
        .route("/v1/bands/link", post(link))
        .route("/v1/bands/transfer", post(transfer))
        .route("/v1/bands/unlink", post(unlink))
        .route("/v1/bands/{tag_id}", get(get_band))
        .route("/v1/bands/{tag_id}/status", post(update_status))
        .route("/v1/bands/{tag_id}/owner-contact", get(owner_contact))
}

// ── Requests & responses ────────────────────────────────────────────

/// Request to validate a band's anti-counterfeiting token.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateTokenRequest {
    /// The band serial from the scanned code.
    pub band_id: String,
    /// The token embedded in the scanned code.
    pub token: String,
}

impl Validate for ValidateTokenRequest {
    fn validate(&self) -> Result<(), String> {
        if self.band_id.trim().is_empty() || self.token.trim().is_empty() {
            return Err("band_id and token must be non-empty".to_string());
        }
        Ok(())
    }
}

/// Successful token validation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidateTokenResponse {
    /// Always `true` on this path.
    pub valid: bool,
    /// The band's current lifecycle status.
    pub band_status: String,
}

/// Request to link an INACTIVE band to a profile.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkRequest {
    pub band_id: String,
    pub profile_id: Uuid,
    pub token: String,
    pub guardian_id: Uuid,
}

impl Validate for LinkRequest {
    fn validate(&self) -> Result<(), String> {
        if self.band_id.trim().is_empty() || self.token.trim().is_empty() {
            return Err("band_id and token must be non-empty".to_string());
        }
        Ok(())
    }
}

/// Request to replace a profile's current band.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    pub old_band_id: String,
    pub new_band_id: String,
    pub profile_id: Uuid,
    /// Token of the replacement band.
    pub token: String,
    pub guardian_id: Uuid,
}

impl Validate for TransferRequest {
    fn validate(&self) -> Result<(), String> {
        if self.old_band_id.trim().is_empty()
            || self.new_band_id.trim().is_empty()
            || self.token.trim().is_empty()
        {
            return Err("old_band_id, new_band_id, and token must be non-empty".to_string());
        }
        if self.old_band_id.eq_ignore_ascii_case(&self.new_band_id) {
            return Err("old_band_id and new_band_id must differ".to_string());
        }
        Ok(())
    }
}

/// Request to deactivate a band without replacement.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UnlinkRequest {
    pub band_id: String,
    pub profile_id: Uuid,
    pub guardian_id: Uuid,
}

impl Validate for UnlinkRequest {
    fn validate(&self) -> Result<(), String> {
        if self.band_id.trim().is_empty() {
            return Err("band_id must be non-empty".to_string());
        }
        Ok(())
    }
}

/// Owner-gated status report.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status name: LOST, STOLEN, ACTIVE, ...
    pub status: String,
    pub guardian_id: Uuid,
}

impl Validate for UpdateStatusRequest {
    fn validate(&self) -> Result<(), String> {
        BandStatus::parse(&self.status).map(|_| ()).ok_or_else(|| {
            format!(
                "unknown status '{}'. Valid statuses: FACTORY_LOCKED, INACTIVE, ACTIVE, LOST, STOLEN, DEACTIVATED",
                self.status
            )
        })
    }
}

/// Client-facing band record. Never carries the secret token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BandResponse {
    pub id: String,
    pub status: String,
    pub linked_guardian_id: Option<Uuid>,
    pub linked_profile_id: Option<Uuid>,
}

impl From<BandView> for BandResponse {
    fn from(view: BandView) -> Self {
        Self {
            id: view.id.as_str().to_string(),
            status: view.status.as_str().to_string(),
            linked_guardian_id: view.linked_guardian_id.map(|g| *g.as_uuid()),
            linked_profile_id: view.linked_profile_id.map(|p| *p.as_uuid()),
        }
    }
}

/// Owner contact surface for a LOST band.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerContactResponse {
    pub name: String,
    pub phone: String,
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/bands/validate — Prove a scanned code is genuine.
#[utoipa::path(
    post,
    path = "/v1/bands/validate",
    request_body = ValidateTokenRequest,
    responses(
        (status = 200, description = "Token is genuine", body = ValidateTokenResponse),
        (status = 401, description = "Token mismatch", body = crate::error::ErrorBody),
        (status = 409, description = "Blocking status", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed input", body = crate::error::ErrorBody),
    ),
    tag = "bands"
)]
pub async fn validate(
    State(state): State<AppState>,
    body: Result<Json<ValidateTokenRequest>, JsonRejection>,
) -> Result<Json<ValidateTokenResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let validation = validate_token(state.store.as_ref(), &req.band_id, &req.token)?;
    Ok(Json(ValidateTokenResponse {
        valid: true,
        band_status: validation.status.as_str().to_string(),
    }))
}

/// POST /v1/bands/link — First activation.
#[utoipa::path(
    post,
    path = "/v1/bands/link",
    request_body = LinkRequest,
    responses(
        (status = 200, description = "Band linked", body = OpResponse),
        (status = 403, description = "Not the profile's guardian", body = crate::error::ErrorBody),
        (status = 409, description = "Already activated or profile already linked", body = crate::error::ErrorBody),
    ),
    tag = "bands"
)]
pub async fn link(
    State(state): State<AppState>,
    body: Result<Json<LinkRequest>, JsonRejection>,
) -> Result<Json<OpResponse>, AppError> {
    let req = extract_validated_json(body)?;
    state.lifecycle.link(
        &req.band_id,
        ProfileId::from_uuid(req.profile_id),
        &req.token,
        GuardianId::from_uuid(req.guardian_id),
    )?;
    Ok(Json(OpResponse::ok()))
}

/// POST /v1/bands/transfer — Replace a lost or broken band atomically.
#[utoipa::path(
    post,
    path = "/v1/bands/transfer",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Band transferred", body = OpResponse),
        (status = 409, description = "Precondition failed, nothing changed", body = crate::error::ErrorBody),
    ),
    tag = "bands"
)]
pub async fn transfer(
    State(state): State<AppState>,
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<OpResponse>, AppError> {
    let req = extract_validated_json(body)?;
    state.lifecycle.transfer(
        &req.old_band_id,
        &req.new_band_id,
        ProfileId::from_uuid(req.profile_id),
        &req.token,
        GuardianId::from_uuid(req.guardian_id),
    )?;
    Ok(Json(OpResponse::ok()))
}

/// POST /v1/bands/unlink — Deactivate without replacement.
#[utoipa::path(
    post,
    path = "/v1/bands/unlink",
    request_body = UnlinkRequest,
    responses(
        (status = 200, description = "Band unlinked", body = OpResponse),
        (status = 403, description = "Not the profile's guardian", body = crate::error::ErrorBody),
    ),
    tag = "bands"
)]
pub async fn unlink(
    State(state): State<AppState>,
    body: Result<Json<UnlinkRequest>, JsonRejection>,
) -> Result<Json<OpResponse>, AppError> {
    let req = extract_validated_json(body)?;
    state.lifecycle.unlink(
        &req.band_id,
        ProfileId::from_uuid(req.profile_id),
        GuardianId::from_uuid(req.guardian_id),
    )?;
    Ok(Json(OpResponse::ok()))
}

/// GET /v1/bands/{tag_id} — Band record with the secret stripped.
#[utoipa::path(
    get,
    path = "/v1/bands/{tag_id}",
    params(("tag_id" = String, Path, description = "Band serial")),
    responses(
        (status = 200, description = "Band found", body = BandResponse),
        (status = 404, description = "Unknown band", body = crate::error::ErrorBody),
    ),
    tag = "bands"
)]
pub async fn get_band(
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
) -> Result<Json<BandResponse>, AppError> {
    let tag_id = TagId::new(tag_id).map_err(wardlink_core::Reject::from)?;
    let band = state
        .store
        .get_band(&tag_id)
        .map_err(wardlink_core::Reject::from)?
        .ok_or_else(wardlink_core::Reject::band_not_found)?;
    Ok(Json(BandResponse::from(BandView::from(&band))))
}

/// POST /v1/bands/{tag_id}/status — Owner-gated status report.
#[utoipa::path(
    post,
    path = "/v1/bands/{tag_id}/status",
    params(("tag_id" = String, Path, description = "Band serial")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OpResponse),
        (status = 403, description = "Caller does not own this band", body = crate::error::ErrorBody),
    ),
    tag = "bands"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<OpResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let status = BandStatus::parse(&req.status)
        .ok_or_else(|| AppError::Validation(format!("unknown status '{}'", req.status)))?;
    state
        .lifecycle
        .update_status(&tag_id, status, GuardianId::from_uuid(req.guardian_id))
        .await?;
    Ok(Json(OpResponse::ok()))
}

/// GET /v1/bands/{tag_id}/owner-contact — LOST-mode contact surface.
///
/// Deliberately does not re-validate the token: a good Samaritan holding a
/// lost band should reach the owner with as little friction as possible.
#[utoipa::path(
    get,
    path = "/v1/bands/{tag_id}/owner-contact",
    params(("tag_id" = String, Path, description = "Band serial")),
    responses(
        (status = 200, description = "Owner contact", body = OwnerContactResponse),
        (status = 409, description = "Band is not reported lost", body = crate::error::ErrorBody),
    ),
    tag = "bands"
)]
pub async fn owner_contact(
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
) -> Result<Json<OwnerContactResponse>, AppError> {
    let contact = state.lifecycle.owner_contact(&tag_id)?;
    Ok(Json(OwnerContactResponse {
        name: contact.name,
        phone: contact.phone,
    }))
}
