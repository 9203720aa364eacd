//! # Error Types
//!
//! Structured error hierarchy for Wardlink. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - [`Reject`] is the business-rejection taxonomy. Every operation returns
//!   `Result<T, Reject>`; a rejected precondition is a value, never a panic
//!   and never an exception escaping a transaction. `Display` renders the
//!   precomposed, non-technical message shown directly to end users.
//! - [`StoreError`] is the only class callers should treat as retryable
//!   infrastructure failure.
//! - [`ValidationError`] covers input-format violations and converts into
//!   `Reject::InvalidFormat`.

use thiserror::Error;

use crate::band::BandStatus;

/// Input-format violations, rejected before any store access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The band serial does not match the expected length or charset.
    #[error("'{0}' is not a valid band code")]
    InvalidTagId(String),

    /// The presented token does not match the expected length or charset.
    /// The value is deliberately not echoed back.
    #[error("the band token is not in a valid format")]
    InvalidSecretToken,

    /// The PIN is not a fixed-length numeric code.
    #[error("the PIN must be exactly {expected} digits")]
    InvalidPin {
        /// Required PIN length.
        expected: usize,
    },
}

/// Infrastructure faults from the backing store.
///
/// Unlike [`Reject`] business rules, these are retryable: the store was
/// unreachable or a write failed, and the caller may try again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// A write was attempted and failed.
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// Failure dispatching an external notification.
///
/// Always confined to a best-effort boundary: logged, never surfaced to
/// the caller of the primary operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The push transport rejected or failed to deliver the message.
    #[error("notification dispatch failed: {0}")]
    Dispatch(String),
}

/// A rejected business operation.
///
/// Messages are precomposed for direct rendering to the person holding the
/// band or the guardian's dashboard; they carry no internal detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Reject {
    /// Input failed format validation before any lookup.
    #[error("{0}")]
    InvalidFormat(String),

    /// The referenced band or profile does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The caller does not own the profile or band it is trying to mutate.
    #[error("you are not authorized to manage this band")]
    Unauthorized,

    /// The presented token does not match the band's secret.
    #[error("this code could not be verified as a genuine band")]
    InvalidToken,

    /// The band's status blocks the operation even with a correct token.
    #[error("{}", .0.blocked_message())]
    Blocked(BandStatus),

    /// A link precondition failed: the band is already activated, or the
    /// profile already has a band.
    #[error("{0}")]
    AlreadyLinked(String),

    /// The band exists but is not in a state where the operation applies.
    #[error("{0}")]
    NotAvailable(String),

    /// The presented PIN does not match the configured credential.
    #[error("incorrect PIN, please try again")]
    InvalidPin,

    /// Too many failed attempts inside the current window.
    #[error("too many attempts, please try again in {retry_after_minutes} minute(s)")]
    RateLimited {
        /// Minutes until the window expires, rounded up.
        retry_after_minutes: u32,
    },

    /// No PIN has been configured for the profile.
    #[error("no PIN has been set up for this profile")]
    NotConfigured,

    /// Infrastructure fault; retryable.
    #[error("something went wrong on our side, please try again")]
    Store(#[from] StoreError),
}

impl Reject {
    /// Build a not-found rejection for a band serial.
    pub fn band_not_found() -> Self {
        Self::NotFound("we could not find a band with this code".to_string())
    }

    /// Build a not-found rejection for a profile.
    pub fn profile_not_found() -> Self {
        Self::NotFound("we could not find this profile".to_string())
    }
}

impl From<ValidationError> for Reject {
    fn from(err: ValidationError) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_to_invalid_format() {
        let reject: Reject = ValidationError::InvalidSecretToken.into();
        match reject {
            Reject::InvalidFormat(msg) => assert!(msg.contains("token")),
            other => panic!("expected InvalidFormat, got: {other:?}"),
        }
    }

    #[test]
    fn blocked_message_is_status_specific() {
        let stolen = Reject::Blocked(BandStatus::Stolen).to_string();
        let deactivated = Reject::Blocked(BandStatus::Deactivated).to_string();
        assert_ne!(stolen, deactivated);
        assert!(stolen.contains("stolen"));
        assert!(deactivated.contains("deactivated"));
    }

    #[test]
    fn rate_limited_carries_minutes() {
        let reject = Reject::RateLimited {
            retry_after_minutes: 12,
        };
        assert!(reject.to_string().contains("12 minute"));
    }

    #[test]
    fn store_error_wraps_into_reject() {
        let reject: Reject = StoreError::Unavailable("connection refused".into()).into();
        // The user-facing message must not leak backend detail.
        assert!(!reject.to_string().contains("connection refused"));
    }

    #[test]
    fn invalid_tag_id_echoes_value() {
        let err = ValidationError::InvalidTagId("x!".to_string());
        assert!(err.to_string().contains("x!"));
    }
}
