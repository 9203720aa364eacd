//! # In-Memory Store
//!
//! The serializable [`TxStore`] implementation backing development and
//! tests, and the seam the unit tests of the lifecycle and credential
//! components run against.
//!
//! A single `parking_lot::Mutex` over all documents makes every
//! transaction trivially serializable: two concurrent `link` calls racing
//! for the same INACTIVE band cannot both observe it INACTIVE at commit
//! time. The lock is synchronous and never held across an `.await`.

use std::sync::Arc;

use parking_lot::Mutex;

use wardlink_core::{Band, Profile, ProfileId, Reject, StoreError, TagId};

use crate::tx::{Documents, Transaction, TxStore};

/// Thread-safe, cloneable in-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Documents>>,
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a band directly, as the out-of-scope provisioning process
    /// would. Not part of the lifecycle surface.
    pub fn insert_band(&self, band: Band) {
        self.inner.lock().bands.insert(band.id().clone(), band);
    }

    /// Insert a profile directly, as the out-of-scope account service
    /// would. Not part of the lifecycle surface.
    pub fn insert_profile(&self, profile: Profile) {
        self.inner.lock().profiles.insert(profile.id, profile);
    }
}

impl TxStore for MemoryStore {
    fn with_transaction<R, F>(&self, f: F) -> Result<R, Reject>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<R, Reject>,
    {
        let mut guard = self.inner.lock();
        let mut tx = Transaction::new(&guard);
        let result = f(&mut tx);
        match result {
            Ok(value) => {
                let (bands, profiles) = tx.into_staged();
                guard.bands.extend(bands);
                guard.profiles.extend(profiles);
                Ok(value)
            }
            Err(reject) => Err(reject),
        }
    }

    fn get_band(&self, id: &TagId) -> Result<Option<Band>, StoreError> {
        Ok(self.inner.lock().bands.get(id).cloned())
    }

    fn get_profile(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        Ok(self.inner.lock().profiles.get(id).cloned())
    }
}
