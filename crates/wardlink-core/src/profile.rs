//! # Profile Record
//!
//! The guardian-managed profile a band resolves to. Profile content
//! editing (names, photos, medical notes) happens elsewhere; this crate
//! only defines the record shape the lifecycle and credential components
//! read and the mirror field they maintain.

use serde::{Deserialize, Serialize};

use crate::identity::{GuardianId, ProfileId, TagId};

/// Contact details shown to a finder when the linked band is LOST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerContact {
    /// Display name of the owning guardian.
    pub name: String,
    /// Phone number the finder can call.
    pub phone: String,
}

/// A guardian-managed profile.
///
/// `current_band_id` mirrors whichever band currently links to this
/// profile and is maintained exclusively by the lifecycle operations.
/// `doctor_pin` stores either an argon2 PHC hash or, transitionally, a
/// legacy plaintext PIN; `Debug` redacts it either way.
#[derive(Clone)]
pub struct Profile {
    /// Profile identifier.
    pub id: ProfileId,
    /// The owning guardian account. Authorization anchor for all mutations.
    pub parent_id: GuardianId,
    /// Name used in scan notifications ("Maya's band was scanned ...").
    pub display_name: String,
    /// The band currently linked to this profile, if any.
    pub current_band_id: Option<TagId>,
    /// PIN guarding the medical/pickup subset: argon2 PHC string, or
    /// legacy plaintext awaiting transparent migration.
    pub doctor_pin: Option<String>,
    /// Contact surface for the LOST read path.
    pub owner_contact: Option<OwnerContact>,
    /// Medical details and emergency contacts. Opaque to this core; read
    /// by the emergency view, mutated elsewhere.
    pub medical: serde_json::Value,
}

impl Profile {
    /// Create a profile with no band, no PIN, and empty medical data.
    pub fn new(id: ProfileId, parent_id: GuardianId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id,
            display_name: display_name.into(),
            current_band_id: None,
            doctor_pin: None,
            owner_contact: None,
            medical: serde_json::Value::Null,
        }
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("id", &self.id)
            .field("parent_id", &self.parent_id)
            .field("display_name", &self.display_name)
            .field("current_band_id", &self.current_band_id)
            .field("doctor_pin", &self.doctor_pin.as_ref().map(|_| "[REDACTED]"))
            .field("owner_contact", &self.owner_contact)
            .finish()
    }
}
