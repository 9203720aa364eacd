//! # PIN Format, Hashing, and Comparison
//!
//! The doctor PIN is a short numeric code. Stored credentials come in two
//! shapes: an argon2id PHC string, or a legacy plaintext value written by
//! an earlier version of the platform. Legacy values are compared in
//! constant time and migrated to argon2id on first successful use.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use subtle::ConstantTimeEq;

use wardlink_core::ValidationError;

/// Required PIN length.
pub const PIN_LENGTH: usize = 4;

/// PHC-string prefix identifying an argon2 hash.
const PHC_PREFIX: &str = "$argon2";

/// Validate that a submitted PIN is exactly [`PIN_LENGTH`] ASCII digits.
pub fn check_pin_format(pin: &str) -> Result<(), ValidationError> {
    if pin.len() != PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPin {
            expected: PIN_LENGTH,
        });
    }
    Ok(())
}

/// Whether a stored credential is a recognized hash rather than legacy
/// plaintext.
pub fn is_phc_hash(stored: &str) -> bool {
    stored.starts_with(PHC_PREFIX)
}

/// Hash a PIN with argon2id and a random salt.
pub fn hash_pin(pin: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(pin.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a PIN against a stored argon2 PHC string.
///
/// An unparseable stored hash counts as a mismatch rather than an error:
/// from the caller's perspective a corrupt credential and a wrong PIN are
/// the same outcome.
pub fn verify_hashed(pin: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(pin.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::warn!(error = %err, "stored PIN hash is unparseable");
            false
        }
    }
}

/// Constant-time comparison of a submitted PIN against a legacy plaintext
/// credential. Unequal lengths are an immediate mismatch; equal-length
/// values are compared byte-for-byte in constant time.
pub fn plaintext_matches(presented: &str, stored: &str) -> bool {
    let presented = presented.as_bytes();
    let stored = stored.as_bytes();
    if presented.len() != stored.len() {
        return false;
    }
    presented.ct_eq(stored).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_format_accepts_four_digits() {
        assert!(check_pin_format("4821").is_ok());
        assert!(check_pin_format("0000").is_ok());
    }

    #[test]
    fn pin_format_rejects_everything_else() {
        assert!(check_pin_format("").is_err());
        assert!(check_pin_format("482").is_err());
        assert!(check_pin_format("48210").is_err());
        assert!(check_pin_format("48a1").is_err());
        assert!(check_pin_format("٤٨٢١").is_err()); // non-ASCII digits
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_pin("4821").unwrap();
        assert!(is_phc_hash(&hash));
        assert!(verify_hashed("4821", &hash));
        assert!(!verify_hashed("4822", &hash));
    }

    #[test]
    fn same_pin_hashes_differently() {
        let a = hash_pin("4821").unwrap();
        let b = hash_pin("4821").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unparseable_hash_is_a_mismatch() {
        assert!(!verify_hashed("4821", "$argon2id$garbage"));
    }

    #[test]
    fn plaintext_is_not_detected_as_hash() {
        assert!(!is_phc_hash("4821"));
    }

    #[test]
    fn plaintext_compare() {
        assert!(plaintext_matches("4821", "4821"));
        assert!(!plaintext_matches("4821", "4822"));
        assert!(!plaintext_matches("4821", "48213")); // length mismatch
        assert!(!plaintext_matches("", "4821"));
    }
}
