//! # Band Record & Lifecycle Status
//!
//! The [`Band`] is the document behind one physical bracelet. Its secret
//! token and link fields are private: all mutation flows through the
//! methods below, which keep the linked-guardian/linked-profile pair in
//! lockstep (both set, or both null) by construction.
//!
//! ## Lifecycle
//!
//! ```text
//! FactoryLocked ──▶ Inactive ──▶ Active ◀──▶ Lost
//!   (provisioning)    (retail)      │    ◀──▶ Stolen
//!                                   ▼
//!                             Deactivated (terminal, via unlink/transfer)
//! ```
//!
//! Status reports (`Lost`, `Stolen`, back to `Active`) are owner-gated but
//! deliberately not constrained by a legal-transition table: the owning
//! guardian always has override. Unlink and transfer-out move a band to
//! `Deactivated`, which clears both links and ends that band's life.

use serde::{Deserialize, Serialize};

use crate::identity::{GuardianId, ProfileId, SecretToken, TagId};

/// Lifecycle status of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandStatus {
    /// Manufactured but not yet released to retail.
    FactoryLocked,
    /// Released to retail, waiting for first activation.
    Inactive,
    /// Linked to a profile and serving the emergency view.
    Active,
    /// Reported lost by the owning guardian.
    Lost,
    /// Reported stolen; blocks all token validation.
    Stolen,
    /// Unlinked or superseded in a transfer. Terminal for this band.
    Deactivated,
}

impl BandStatus {
    /// Return the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FactoryLocked => "FACTORY_LOCKED",
            Self::Inactive => "INACTIVE",
            Self::Active => "ACTIVE",
            Self::Lost => "LOST",
            Self::Stolen => "STOLEN",
            Self::Deactivated => "DEACTIVATED",
        }
    }

    /// Parse a canonical status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FACTORY_LOCKED" => Some(Self::FactoryLocked),
            "INACTIVE" => Some(Self::Inactive),
            "ACTIVE" => Some(Self::Active),
            "LOST" => Some(Self::Lost),
            "STOLEN" => Some(Self::Stolen),
            "DEACTIVATED" => Some(Self::Deactivated),
            _ => None,
        }
    }

    /// Whether this status blocks token validation even on a correct secret.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Stolen | Self::Deactivated)
    }

    /// The user-facing message shown when validation is blocked by status.
    pub fn blocked_message(&self) -> &'static str {
        match self {
            Self::Stolen => "this band has been reported stolen and can no longer be used",
            Self::Deactivated => "this band has been deactivated",
            _ => "this band cannot be used right now",
        }
    }
}

impl std::fmt::Display for BandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document behind one physical band.
///
/// The secret token never leaves this type: there is no accessor for the
/// raw value, `Debug` is redacted, and the type is not serializable. Read
/// paths expose a [`BandView`] instead.
#[derive(Clone)]
pub struct Band {
    id: TagId,
    secret_token: SecretToken,
    status: BandStatus,
    linked_guardian_id: Option<GuardianId>,
    linked_profile_id: Option<ProfileId>,
}

impl Band {
    /// Create a band record as the provisioning process would: a fixed
    /// serial, a manufacture-time secret, and an initial status.
    pub fn provision(id: TagId, secret_token: SecretToken, status: BandStatus) -> Self {
        Self {
            id,
            secret_token,
            status,
            linked_guardian_id: None,
            linked_profile_id: None,
        }
    }

    /// The band serial.
    pub fn id(&self) -> &TagId {
        &self.id
    }

    /// Current lifecycle status.
    pub fn status(&self) -> BandStatus {
        self.status
    }

    /// The guardian this band is linked to, if any.
    pub fn linked_guardian_id(&self) -> Option<GuardianId> {
        self.linked_guardian_id
    }

    /// The profile this band is linked to, if any.
    pub fn linked_profile_id(&self) -> Option<ProfileId> {
        self.linked_profile_id
    }

    /// Compare a presented token against the manufacture-time secret,
    /// ignoring ASCII case.
    pub fn token_matches(&self, presented: &str) -> bool {
        self.secret_token.matches_ignoring_case(presented)
    }

    /// First activation or transfer-in: mark the band active and set both
    /// link fields together.
    pub fn activate_for(&mut self, guardian_id: GuardianId, profile_id: ProfileId) {
        self.status = BandStatus::Active;
        self.linked_guardian_id = Some(guardian_id);
        self.linked_profile_id = Some(profile_id);
    }

    /// Unlink or transfer-out: mark the band deactivated and clear both
    /// link fields together.
    pub fn deactivate(&mut self) {
        self.status = BandStatus::Deactivated;
        self.linked_guardian_id = None;
        self.linked_profile_id = None;
    }

    /// Owner-initiated status report. Links are untouched; the from-state
    /// is not constrained here (the owner always has override).
    pub fn set_status(&mut self, status: BandStatus) {
        self.status = status;
    }
}

impl std::fmt::Debug for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Band")
            .field("id", &self.id)
            .field("secret_token", &self.secret_token)
            .field("status", &self.status)
            .field("linked_guardian_id", &self.linked_guardian_id)
            .field("linked_profile_id", &self.linked_profile_id)
            .finish()
    }
}

/// Client-facing projection of a [`Band`].
///
/// Built from a band on every read path; carries no secret field at all,
/// so stripping cannot be forgotten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandView {
    /// The band serial.
    pub id: TagId,
    /// Current lifecycle status.
    pub status: BandStatus,
    /// The guardian this band is linked to, if any.
    pub linked_guardian_id: Option<GuardianId>,
    /// The profile this band is linked to, if any.
    pub linked_profile_id: Option<ProfileId>,
}

impl From<&Band> for BandView {
    fn from(band: &Band) -> Self {
        Self {
            id: band.id.clone(),
            status: band.status,
            linked_guardian_id: band.linked_guardian_id,
            linked_profile_id: band.linked_profile_id,
        }
    }
}
