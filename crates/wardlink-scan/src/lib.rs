//! # wardlink-scan — Scan Recording
//!
//! Everything that happens when a band's code is physically read:
//!
//! - **Device** (`device.rs`): coarse user-agent classification. Advisory,
//!   never blocking.
//! - **Geocode** (`geocode.rs`): the allow-listed reverse-geocoding
//!   collaborator turning coordinates into "Lisbon, Portugal".
//! - **Recorder** (`recorder.rs`): validate, sanitize, classify, persist,
//!   then notify the guardian on a spawned task. Only the durable append
//!   can fail the caller.

pub mod device;
pub mod geocode;
pub mod recorder;

pub use device::classify_user_agent;
pub use geocode::{GeoResolver, GeocodeError, HttpReverseGeocoder, Placename};
pub use recorder::ScanRecorder;
