//! # Scan Event Types
//!
//! One [`ScanEvent`] per physical read of a band's code. Events are
//! append-only: once written, only the `is_read` dashboard flag may change.

use serde::{Deserialize, Serialize};

use crate::identity::{ScanId, TagId};
use crate::temporal::Timestamp;

/// A geographic point reported by the scanning device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Whether the coordinates are within valid WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Discard out-of-range coordinates instead of rejecting the scan.
///
/// A scan with garbage coordinates is still a scan worth recording; only
/// the location is dropped.
pub fn sanitize_location(location: Option<GeoPoint>) -> Option<GeoPoint> {
    location.filter(GeoPoint::is_valid)
}

/// Coarse device bucket derived from the user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Mobile,
    Tablet,
    Desktop,
    Unknown,
}

/// Coarse browser bucket derived from the user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Browser {
    Chrome,
    Safari,
    Firefox,
    Edge,
    Other,
}

/// Coarse operating-system bucket derived from the user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Os {
    Ios,
    Android,
    Windows,
    MacOs,
    Linux,
    Other,
}

impl DeviceKind {
    /// Canonical string form, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
            Self::Unknown => "unknown",
        }
    }
}

impl Browser {
    /// Canonical string form, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Safari => "safari",
            Self::Firefox => "firefox",
            Self::Edge => "edge",
            Self::Other => "other",
        }
    }
}

impl Os {
    /// Canonical string form, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Windows => "windows",
            Self::MacOs => "mac_os",
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }
}

/// Best-effort, non-authoritative classification of the scanning device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub device: DeviceKind,
    pub browser: Browser,
    pub os: Os,
}

impl DeviceInfo {
    /// The classification used when nothing can be derived.
    pub fn unknown() -> Self {
        Self {
            device: DeviceKind::Unknown,
            browser: Browser::Other,
            os: Os::Other,
        }
    }
}

/// An immutable record of one physical scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEvent {
    /// Scan identifier.
    pub id: ScanId,
    /// The band that was scanned.
    pub band_id: TagId,
    /// When the scan was recorded.
    pub at: Timestamp,
    /// Sanitized device location, if provided and in range.
    pub location: Option<GeoPoint>,
    /// City from reverse geocoding, when resolvable.
    pub city: Option<String>,
    /// Country from reverse geocoding, when resolvable.
    pub country: Option<String>,
    /// Advisory device classification.
    pub device: DeviceInfo,
    /// Dashboard read flag. The only mutable field.
    pub is_read: bool,
}
