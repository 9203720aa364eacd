//! # wardlink-core — Foundational Types
//!
//! Domain types shared by every Wardlink crate:
//!
//! - **Identity** (`identity.rs`): newtypes for band serials, profiles,
//!   guardians, and scans; the never-serialized manufacture secret.
//! - **Band** (`band.rs`): the band record, its lifecycle status enum, and
//!   the client-facing [`BandView`] projection.
//! - **Profile** (`profile.rs`): the guardian-managed profile record and
//!   the LOST-mode owner contact surface.
//! - **Scan** (`scan.rs`): scan events, geolocation sanitization, and the
//!   advisory device classification buckets.
//! - **Errors** (`error.rs`): the [`Reject`] business-rejection taxonomy,
//!   store and notification faults, and input validation errors.
//! - **Notify** (`notify.rs`): the push-notification collaborator seam.
//!
//! ## Crate Policy
//!
//! No I/O, no store access, no HTTP. Everything here is a value type or a
//! collaborator trait; the crates above supply behavior.

pub mod band;
pub mod error;
pub mod identity;
pub mod notify;
pub mod profile;
pub mod scan;
pub mod temporal;

// ─── Re-exports ─────────────────────────────────────────────────────

pub use band::{Band, BandStatus, BandView};
pub use error::{NotifyError, Reject, StoreError, ValidationError};
pub use identity::{GuardianId, ProfileId, ScanId, SecretToken, TagId};
pub use notify::{Notifier, NullNotifier};
pub use profile::{OwnerContact, Profile};
pub use scan::{sanitize_location, Browser, DeviceInfo, DeviceKind, GeoPoint, Os, ScanEvent};
pub use temporal::Timestamp;
