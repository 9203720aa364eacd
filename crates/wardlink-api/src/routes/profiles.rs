//! # Profile Credential API
//!
//! PIN verification guarding the medical/pickup subset of a profile's
//! emergency view. Brute force is absorbed by the credential gate; this
//! layer only shapes requests and responses.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use wardlink_core::ProfileId;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::OpResponse;
use crate::state::AppState;

/// Build the profiles router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/profiles/{profile_id}/verify-pin", post(verify_pin))
}

/// PIN submission.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyPinRequest {
    /// The submitted PIN.
    pub pin: String,
}

impl Validate for VerifyPinRequest {
    fn validate(&self) -> Result<(), String> {
        if self.pin.trim().is_empty() {
            return Err("pin must be non-empty".to_string());
        }
        Ok(())
    }
}

/// POST /v1/profiles/{profile_id}/verify-pin — Verify the doctor PIN.
#[utoipa::path(
    post,
    path = "/v1/profiles/{profile_id}/verify-pin",
    params(("profile_id" = Uuid, Path, description = "Profile ID")),
    request_body = VerifyPinRequest,
    responses(
        (status = 200, description = "PIN verified", body = OpResponse),
        (status = 401, description = "Incorrect PIN", body = crate::error::ErrorBody),
        (status = 429, description = "Too many attempts", body = crate::error::ErrorBody),
    ),
    tag = "profiles"
)]
pub async fn verify_pin(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    body: Result<Json<VerifyPinRequest>, JsonRejection>,
) -> Result<Json<OpResponse>, AppError> {
    let req = extract_validated_json(body)?;
    state
        .gate
        .verify_pin(ProfileId::from_uuid(profile_id), &req.pin)?;
    Ok(Json(OpResponse::ok()))
}
