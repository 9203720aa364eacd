//! # Token Validation
//!
//! Proves that a scanned code came from a genuine band. Format violations
//! are rejected before any store lookup; a correct secret does not
//! override a blocking status (STOLEN, DEACTIVATED).
//!
//! [`validate_token`] is the standalone read-only pre-check used by the
//! entry dispatch. [`check_token`] is the same secret-and-status check
//! applied to a band already read inside a lifecycle transaction.

use wardlink_core::{Band, BandStatus, Reject, SecretToken, TagId};
use wardlink_store::TxStore;

/// Successful validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenValidation {
    /// The band's current lifecycle status, for dispatch.
    pub status: BandStatus,
}

/// Verify a presented token against a band already in hand.
pub fn check_token(band: &Band, presented: &str) -> Result<(), Reject> {
    if !band.token_matches(presented) {
        return Err(Reject::InvalidToken);
    }
    if band.status().is_blocking() {
        return Err(Reject::Blocked(band.status()));
    }
    Ok(())
}

/// Standalone validation: format, lookup, secret match, blocking status.
/// Read-only; no side effects.
pub fn validate_token<S: TxStore>(
    store: &S,
    tag_id: &str,
    token: &str,
) -> Result<TokenValidation, Reject> {
    let tag_id = TagId::new(tag_id)?;
    SecretToken::check_format(token)?;

    let band = store
        .get_band(&tag_id)?
        .ok_or_else(Reject::band_not_found)?;
    check_token(&band, token)?;

    Ok(TokenValidation {
        status: band.status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardlink_core::Band;
    use wardlink_store::MemoryStore;

    fn store_with(status: BandStatus) -> (MemoryStore, TagId) {
        let store = MemoryStore::new();
        let tag_id = TagId::new("WL-TOK001").unwrap();
        store.insert_band(Band::provision(
            tag_id.clone(),
            SecretToken::new("s3cr3t-token").unwrap(),
            status,
        ));
        (store, tag_id)
    }

    #[test]
    fn malformed_input_rejected_before_lookup() {
        let store = MemoryStore::new();
        assert!(matches!(
            validate_token(&store, "x!", "s3cr3t-token"),
            Err(Reject::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_token(&store, "WL-TOK001", "nope"),
            Err(Reject::InvalidFormat(_))
        ));
    }

    #[test]
    fn unknown_band_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            validate_token(&store, "WL-GHOST1", "s3cr3t-token"),
            Err(Reject::NotFound(_))
        ));
    }

    #[test]
    fn match_is_case_insensitive_and_reports_status() {
        let (store, _) = store_with(BandStatus::Inactive);
        let result = validate_token(&store, "wl-tok001", "S3CR3T-TOKEN").unwrap();
        assert_eq!(result.status, BandStatus::Inactive);
    }

    #[test]
    fn wrong_token_rejected() {
        let (store, _) = store_with(BandStatus::Inactive);
        assert_eq!(
            validate_token(&store, "WL-TOK001", "wrong-token"),
            Err(Reject::InvalidToken)
        );
    }

    #[test]
    fn correct_token_does_not_override_blocking_status() {
        for status in [BandStatus::Stolen, BandStatus::Deactivated] {
            let (store, _) = store_with(status);
            assert_eq!(
                validate_token(&store, "WL-TOK001", "s3cr3t-token"),
                Err(Reject::Blocked(status))
            );
        }
    }

    #[test]
    fn lost_band_still_validates() {
        let (store, _) = store_with(BandStatus::Lost);
        let result = validate_token(&store, "WL-TOK001", "s3cr3t-token").unwrap();
        assert_eq!(result.status, BandStatus::Lost);
    }
}
