//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout Wardlink. Each
//! identifier is a distinct type, so a [`ProfileId`] cannot be passed where
//! a [`GuardianId`] is expected.
//!
//! ## Validation
//!
//! The band serial ([`TagId`]) and the manufacturing secret
//! ([`SecretToken`]) are string-based and validate format at construction
//! time. UUID-based identifiers ([`ProfileId`], [`GuardianId`], [`ScanId`])
//! are always valid by construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// A unique identifier for a guardian-managed profile (the person wearing
/// the band).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Create a new random profile identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a profile identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a guardian account (the owner of one or more
/// profiles, and the authorization anchor for all band mutations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuardianId(Uuid);

impl GuardianId {
    /// Create a new random guardian identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a guardian identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GuardianId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GuardianId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a recorded scan event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanId(Uuid);

impl ScanId {
    /// Create a new random scan identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a scan identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// The serial printed on a physical band at manufacture.
///
/// Canonical storage form is uppercase. The constructor accepts any case
/// (the code is hand-typed from a bracelet as often as it is scanned).
///
/// # Validation
///
/// - 6 to 24 characters
/// - ASCII letters, digits, and `-` only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagId(String);

impl TagId {
    /// Minimum serial length.
    pub const MIN_LEN: usize = 6;
    /// Maximum serial length.
    pub const MAX_LEN: usize = 24;

    /// Create a band serial from a string value, validating format.
    ///
    /// The value is uppercased for storage consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTagId`] if the format is invalid.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_uppercase();

        if upper.len() < Self::MIN_LEN || upper.len() > Self::MAX_LEN {
            return Err(ValidationError::InvalidTagId(raw));
        }
        if !upper
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ValidationError::InvalidTagId(raw));
        }

        Ok(Self(upper))
    }

    /// Access the serial in canonical (uppercase) form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The anti-counterfeiting secret bound to a band at manufacture.
///
/// The value proves a scanned code came from a genuine band rather than a
/// photographed or cloned copy. It is set once, never mutated, and never
/// leaves the store: there is no accessor returning the raw value, `Debug`
/// redacts it, and the type implements neither `Serialize` nor `Display`.
///
/// # Validation
///
/// - 6 to 128 characters
/// - ASCII letters, digits, and `-` only
#[derive(Clone)]
pub struct SecretToken(String);

impl SecretToken {
    /// Minimum token length.
    pub const MIN_LEN: usize = 6;
    /// Maximum token length.
    pub const MAX_LEN: usize = 128;

    /// Create a secret token, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSecretToken`] if the format is
    /// invalid. The offending value is deliberately not echoed back.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::check_format(&s)?;
        Ok(Self(s))
    }

    /// Validate the format of a presented token without constructing one.
    ///
    /// Used to reject malformed input before any store lookup.
    pub fn check_format(s: &str) -> Result<(), ValidationError> {
        if s.len() < Self::MIN_LEN || s.len() > Self::MAX_LEN {
            return Err(ValidationError::InvalidSecretToken);
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ValidationError::InvalidSecretToken);
        }
        Ok(())
    }

    /// Compare a presented token against this secret, ignoring ASCII case.
    ///
    /// Tokens are printed on physical bands and read back by humans and
    /// QR decoders, so the match is case-insensitive.
    pub fn matches_ignoring_case(&self, presented: &str) -> bool {
        self.0.eq_ignore_ascii_case(presented)
    }
}

impl std::fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretToken([REDACTED])")
    }
}
