//! # API Routes
//!
//! - [`scan`]: the entry dispatch a scanned code lands on, plus scan
//!   recording with geolocation.
//! - [`bands`]: token validation and the lifecycle operations.
//! - [`profiles`]: PIN verification.

pub mod bands;
pub mod profiles;
pub mod scan;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform success envelope for mutating operations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OpResponse {
    /// Always `true`; failures arrive as structured error bodies instead.
    pub success: bool,
}

impl OpResponse {
    /// The success envelope.
    pub fn ok() -> Self {
        Self { success: true }
    }
}
