//! # Transactional Store Seam
//!
//! The lifecycle state machine and the credential gate mutate bands and
//! profiles only through [`TxStore::with_transaction`]: read every touched
//! document from a consistent snapshot, validate preconditions, stage
//! writes, and commit all of them or none.
//!
//! The closure returns `Result<R, Reject>`; the runner discards all staged
//! writes on `Err`. There is no exception-based abort path, and a
//! precondition failure surfaces as an ordinary rejected value.

use std::collections::HashMap;

use wardlink_core::{Band, Profile, ProfileId, Reject, StoreError, TagId};

/// The document families a transaction may touch.
#[derive(Debug, Default)]
pub struct Documents {
    pub(crate) bands: HashMap<TagId, Band>,
    pub(crate) profiles: HashMap<ProfileId, Profile>,
}

/// A read-check-write transaction over bands and profiles.
///
/// Reads see staged writes from the same transaction (read-your-writes);
/// nothing is visible to other callers until commit.
pub struct Transaction<'a> {
    base: &'a Documents,
    staged_bands: HashMap<TagId, Band>,
    staged_profiles: HashMap<ProfileId, Profile>,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(base: &'a Documents) -> Self {
        Self {
            base,
            staged_bands: HashMap::new(),
            staged_profiles: HashMap::new(),
        }
    }

    /// Read a band from the snapshot.
    pub fn band(&self, id: &TagId) -> Option<Band> {
        self.staged_bands
            .get(id)
            .or_else(|| self.base.bands.get(id))
            .cloned()
    }

    /// Read a profile from the snapshot.
    pub fn profile(&self, id: &ProfileId) -> Option<Profile> {
        self.staged_profiles
            .get(id)
            .or_else(|| self.base.profiles.get(id))
            .cloned()
    }

    /// Stage a band write. Applied only if the transaction commits.
    pub fn put_band(&mut self, band: Band) {
        self.staged_bands.insert(band.id().clone(), band);
    }

    /// Stage a profile write. Applied only if the transaction commits.
    pub fn put_profile(&mut self, profile: Profile) {
        self.staged_profiles.insert(profile.id, profile);
    }

    pub(crate) fn into_staged(self) -> (HashMap<TagId, Band>, HashMap<ProfileId, Profile>) {
        (self.staged_bands, self.staged_profiles)
    }
}

/// A store offering serializable read-check-write transactions over the
/// documents it holds.
///
/// Implementable by anything with multi-document atomicity: the in-memory
/// [`MemoryStore`](crate::MemoryStore), a SQL backend with SERIALIZABLE
/// transactions, or a transactional KV store. The business logic is
/// identical regardless of backend.
pub trait TxStore: Send + Sync + 'static {
    /// Run `f` against a consistent snapshot. Staged writes are applied
    /// atomically when `f` returns `Ok`, and discarded entirely when it
    /// returns `Err`.
    fn with_transaction<R, F>(&self, f: F) -> Result<R, Reject>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<R, Reject>;

    /// Read a single band outside any transaction.
    fn get_band(&self, id: &TagId) -> Result<Option<Band>, StoreError>;

    /// Read a single profile outside any transaction.
    fn get_profile(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError>;
}
