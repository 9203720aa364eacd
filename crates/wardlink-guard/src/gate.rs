//! # Credential Gate
//!
//! PIN verification protecting the medical/pickup subset of a profile.
//! One call walks a fixed sequence:
//!
//! 1. format check (fails fast, no limiter or store access)
//! 2. rate-limit check (429-style rejection with minutes remaining)
//! 3. profile load, 4. configured-PIN check (both record an attempt on
//!    failure so the failure mode cannot be used to probe which profiles
//!    exist or have a PIN)
//! 5. hash or legacy-plaintext verification
//! 6. transparent migration of a matched legacy value to argon2id
//! 7. attempt recording on mismatch, 8. reset on success

use std::sync::Arc;

use wardlink_core::{ProfileId, Reject};
use wardlink_store::TxStore;

use crate::limiter::RateLimiter;
use crate::pin;

/// PIN verification service.
#[derive(Clone)]
pub struct CredentialGate<S> {
    store: Arc<S>,
    limiter: RateLimiter,
}

impl<S: TxStore> CredentialGate<S> {
    /// Create a gate over the given store and limiter.
    pub fn new(store: Arc<S>, limiter: RateLimiter) -> Self {
        Self { store, limiter }
    }

    /// The per-profile attempt-counter key.
    fn rate_key(profile_id: &ProfileId) -> String {
        format!("pin_verify_{profile_id}")
    }

    /// Verify a submitted PIN for a profile.
    pub fn verify_pin(&self, profile_id: ProfileId, pin: &str) -> Result<(), Reject> {
        pin::check_pin_format(pin)?;

        let key = Self::rate_key(&profile_id);
        if self.limiter.is_limited(&key) {
            let secs = self.limiter.time_remaining(&key).as_secs();
            let retry_after_minutes = (secs.div_ceil(60)).max(1) as u32;
            tracing::info!(profile_id = %profile_id, "PIN verification rate limited");
            return Err(Reject::RateLimited {
                retry_after_minutes,
            });
        }

        let profile = match self.store.get_profile(&profile_id) {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                // Recorded even though the lookup failed, so a missing
                // profile is indistinguishable from a wrong PIN.
                self.limiter.record_attempt(&key);
                return Err(Reject::profile_not_found());
            }
            Err(err) => return Err(err.into()),
        };

        let stored = match profile.doctor_pin {
            Some(stored) => stored,
            None => {
                self.limiter.record_attempt(&key);
                return Err(Reject::NotConfigured);
            }
        };

        let matched = if pin::is_phc_hash(&stored) {
            pin::verify_hashed(pin, &stored)
        } else {
            let matched = pin::plaintext_matches(pin, &stored);
            if matched {
                self.migrate_legacy(profile_id, &stored, pin);
            }
            matched
        };

        if matched {
            self.limiter.reset_attempts(&key);
            Ok(())
        } else {
            self.limiter.record_attempt(&key);
            Err(Reject::InvalidPin)
        }
    }

    /// Replace a matched legacy plaintext credential with an argon2id hash.
    ///
    /// Best-effort: the PIN already verified, so any failure here is
    /// logged and the verification result stands.
    fn migrate_legacy(&self, profile_id: ProfileId, stored_plaintext: &str, pin: &str) {
        let hash = match pin::hash_pin(pin) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::warn!(profile_id = %profile_id, error = %err, "legacy PIN migration: hashing failed");
                return;
            }
        };

        let result = self.store.with_transaction(|tx| {
            let mut profile = tx
                .profile(&profile_id)
                .ok_or_else(Reject::profile_not_found)?;
            // Only migrate the value we actually verified against.
            if profile.doctor_pin.as_deref() == Some(stored_plaintext) {
                profile.doctor_pin = Some(hash.clone());
                tx.put_profile(profile);
            }
            Ok(())
        });

        match result {
            Ok(()) => {
                tracing::info!(profile_id = %profile_id, "legacy PIN migrated to argon2id")
            }
            Err(err) => {
                tracing::warn!(profile_id = %profile_id, error = %err, "legacy PIN migration failed, keeping plaintext")
            }
        }
    }
}
