//! # Lifecycle State Machine
//!
//! Link, transfer, unlink, and status reports for a band. Every mutation
//! runs inside one store transaction: read the touched documents from a
//! consistent snapshot, validate all preconditions against that snapshot,
//! then stage every write and commit together or not at all. A failed
//! precondition is a typed [`Reject`], and a rejected transaction leaves
//! no observable change.
//!
//! Status reports carry a best-effort side effect after commit: entering
//! LOST, or returning from LOST to ACTIVE, notifies the owning guardian.
//! Notification failures are logged and never roll back the status write.

use std::sync::Arc;

use wardlink_core::{
    BandStatus, GuardianId, Notifier, OwnerContact, ProfileId, Reject, SecretToken, TagId,
};
use wardlink_store::TxStore;

use crate::token::check_token;

/// The band lifecycle service.
#[derive(Clone)]
pub struct Lifecycle<S> {
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
}

impl<S: TxStore> Lifecycle<S> {
    /// Create the service over a store and a push-notification seam.
    pub fn new(store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// First activation: bind an INACTIVE band to a profile.
    pub fn link(
        &self,
        tag_id: &str,
        profile_id: ProfileId,
        token: &str,
        guardian_id: GuardianId,
    ) -> Result<(), Reject> {
        let tag_id = TagId::new(tag_id)?;
        SecretToken::check_format(token)?;

        self.store.with_transaction(|tx| {
            let mut band = tx.band(&tag_id).ok_or_else(Reject::band_not_found)?;
            check_token(&band, token)?;
            match band.status() {
                BandStatus::Inactive => {}
                BandStatus::FactoryLocked => {
                    return Err(Reject::NotAvailable(
                        "this band is not yet available for activation".to_string(),
                    ))
                }
                _ => {
                    return Err(Reject::AlreadyLinked(
                        "this band has already been activated".to_string(),
                    ))
                }
            }

            let mut profile = tx
                .profile(&profile_id)
                .ok_or_else(Reject::profile_not_found)?;
            if profile.parent_id != guardian_id {
                return Err(Reject::Unauthorized);
            }
            if profile.current_band_id.is_some() {
                return Err(Reject::AlreadyLinked(
                    "this profile already has a band linked to it".to_string(),
                ));
            }

            band.activate_for(guardian_id, profile_id);
            profile.current_band_id = Some(tag_id.clone());
            tx.put_band(band);
            tx.put_profile(profile);
            Ok(())
        })?;

        tracing::info!(band_id = %tag_id, profile_id = %profile_id, "band linked");
        Ok(())
    }

    /// Replace a profile's current band with a new one, atomically.
    pub fn transfer(
        &self,
        old_tag_id: &str,
        new_tag_id: &str,
        profile_id: ProfileId,
        new_token: &str,
        guardian_id: GuardianId,
    ) -> Result<(), Reject> {
        let old_id = TagId::new(old_tag_id)?;
        let new_id = TagId::new(new_tag_id)?;
        SecretToken::check_format(new_token)?;

        self.store.with_transaction(|tx| {
            let mut new_band = tx.band(&new_id).ok_or_else(Reject::band_not_found)?;
            check_token(&new_band, new_token)?;

            let mut old_band = tx.band(&old_id).ok_or_else(Reject::band_not_found)?;
            let mut profile = tx
                .profile(&profile_id)
                .ok_or_else(Reject::profile_not_found)?;
            if profile.parent_id != guardian_id {
                return Err(Reject::Unauthorized);
            }
            if profile.current_band_id.as_ref() != Some(&old_id)
                || old_band.linked_profile_id() != Some(profile_id)
            {
                return Err(Reject::NotAvailable(
                    "this band is not the one currently linked to the profile".to_string(),
                ));
            }
            if new_band.status() != BandStatus::Inactive {
                return Err(Reject::AlreadyLinked(
                    "the replacement band has already been activated".to_string(),
                ));
            }

            old_band.deactivate();
            new_band.activate_for(guardian_id, profile_id);
            profile.current_band_id = Some(new_id.clone());
            tx.put_band(old_band);
            tx.put_band(new_band);
            tx.put_profile(profile);
            Ok(())
        })?;

        tracing::info!(
            old_band_id = %old_id,
            new_band_id = %new_id,
            profile_id = %profile_id,
            "band transferred"
        );
        Ok(())
    }

    /// Deactivate a band without replacement and clear the profile mirror.
    pub fn unlink(
        &self,
        tag_id: &str,
        profile_id: ProfileId,
        guardian_id: GuardianId,
    ) -> Result<(), Reject> {
        let tag_id = TagId::new(tag_id)?;

        self.store.with_transaction(|tx| {
            let mut band = tx.band(&tag_id).ok_or_else(Reject::band_not_found)?;
            let mut profile = tx
                .profile(&profile_id)
                .ok_or_else(Reject::profile_not_found)?;
            if profile.parent_id != guardian_id {
                return Err(Reject::Unauthorized);
            }

            band.deactivate();
            profile.current_band_id = None;
            tx.put_band(band);
            tx.put_profile(profile);
            Ok(())
        })?;

        tracing::info!(band_id = %tag_id, profile_id = %profile_id, "band unlinked");
        Ok(())
    }

    /// Owner-gated status write.
    ///
    /// The from-state is deliberately unconstrained: the owning guardian
    /// always has override (a STOLEN band can go straight back to ACTIVE,
    /// and ACTIVE to ACTIVE is a silent no-op). A DEACTIVATED band has no
    /// linked guardian and therefore cannot be mutated this way.
    pub async fn update_status(
        &self,
        tag_id: &str,
        new_status: BandStatus,
        guardian_id: GuardianId,
    ) -> Result<(), Reject> {
        let tag_id = TagId::new(tag_id)?;

        let previous = self.store.with_transaction(|tx| {
            let mut band = tx.band(&tag_id).ok_or_else(Reject::band_not_found)?;
            if band.linked_guardian_id() != Some(guardian_id) {
                return Err(Reject::Unauthorized);
            }
            let previous = band.status();
            band.set_status(new_status);
            tx.put_band(band);
            Ok(previous)
        })?;

        tracing::info!(
            band_id = %tag_id,
            from = %previous,
            to = %new_status,
            "band status updated"
        );
        self.notify_status_change(&tag_id, previous, new_status, guardian_id)
            .await;
        Ok(())
    }

    /// Report the band lost.
    pub async fn report_lost(&self, tag_id: &str, guardian_id: GuardianId) -> Result<(), Reject> {
        self.update_status(tag_id, BandStatus::Lost, guardian_id).await
    }

    /// Report the band stolen.
    pub async fn report_stolen(&self, tag_id: &str, guardian_id: GuardianId) -> Result<(), Reject> {
        self.update_status(tag_id, BandStatus::Stolen, guardian_id)
            .await
    }

    /// Put a lost or stolen band back into service.
    pub async fn reactivate(&self, tag_id: &str, guardian_id: GuardianId) -> Result<(), Reject> {
        self.update_status(tag_id, BandStatus::Active, guardian_id)
            .await
    }

    /// Contact surface for the LOST read path: a finder holding a lost
    /// band sees how to reach the owner. Only a band currently reported
    /// lost exposes this.
    pub fn owner_contact(&self, tag_id: &str) -> Result<OwnerContact, Reject> {
        let tag_id = TagId::new(tag_id)?;
        let band = self
            .store
            .get_band(&tag_id)?
            .ok_or_else(Reject::band_not_found)?;
        if band.status() != BandStatus::Lost {
            return Err(Reject::NotAvailable(
                "owner contact is only shown for a band reported lost".to_string(),
            ));
        }
        let profile_id = band.linked_profile_id().ok_or_else(|| {
            Reject::NotAvailable("this band is not linked to a profile".to_string())
        })?;
        let profile = self
            .store
            .get_profile(&profile_id)?
            .ok_or_else(Reject::profile_not_found)?;
        profile.owner_contact.ok_or_else(|| {
            Reject::NotAvailable("the owner has not shared contact details".to_string())
        })
    }

    /// Fire the lost/found notification when the transition calls for one.
    /// Best-effort: failures are logged, never surfaced.
    async fn notify_status_change(
        &self,
        tag_id: &TagId,
        previous: BandStatus,
        new_status: BandStatus,
        guardian_id: GuardianId,
    ) {
        let notice = match (previous, new_status) {
            (prev, BandStatus::Lost) if prev != BandStatus::Lost => Some((
                "Band reported lost",
                format!(
                    "Band {tag_id} is now marked lost. You will be notified when it is scanned."
                ),
            )),
            (BandStatus::Lost, BandStatus::Active) => Some((
                "Band back in service",
                format!("Band {tag_id} is active again."),
            )),
            _ => None,
        };

        let Some((title, body)) = notice else {
            return;
        };
        let data = serde_json::json!({
            "band_id": tag_id.as_str(),
            "status": new_status.as_str(),
        });
        if let Err(err) = self.notifier.push(guardian_id, title, &body, data).await {
            tracing::warn!(
                band_id = %tag_id,
                error = %err,
                "status notification failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use wardlink_core::{Band, NotifyError, Profile};
    use wardlink_store::MemoryStore;

    /// Test double capturing pushes, optionally failing every dispatch.
    #[derive(Default)]
    struct RecordingNotifier {
        fail: bool,
        sent: Mutex<Vec<(GuardianId, String)>>,
    }

    impl RecordingNotifier {
        fn failing() -> Self {
            Self {
                fail: true,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn titles(&self) -> Vec<String> {
            self.sent.lock().iter().map(|(_, t)| t.clone()).collect()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn push(
            &self,
            guardian_id: GuardianId,
            title: &str,
            _body: &str,
            _data: serde_json::Value,
        ) -> Result<(), NotifyError> {
            self.sent.lock().push((guardian_id, title.to_string()));
            if self.fail {
                Err(NotifyError::Dispatch("transport down".to_string()))
            } else {
                Ok(())
            }
        }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingNotifier>,
        lifecycle: Lifecycle<MemoryStore>,
        guardian: GuardianId,
        profile: ProfileId,
    }

    fn fixture() -> Fixture {
        fixture_with_notifier(Arc::new(RecordingNotifier::default()))
    }

    fn fixture_with_notifier(notifier: Arc<RecordingNotifier>) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let guardian = GuardianId::new();
        let profile = ProfileId::new();
        store.insert_profile(Profile::new(profile, guardian, "Maya"));
        seed_band(&store, "WL-BAND01", "band01-secret", BandStatus::Inactive);
        let dyn_notifier: Arc<dyn Notifier> = notifier.clone();
        let lifecycle = Lifecycle::new(Arc::clone(&store), dyn_notifier);
        Fixture {
            store,
            notifier,
            lifecycle,
            guardian,
            profile,
        }
    }

    fn seed_band(store: &MemoryStore, id: &str, secret: &str, status: BandStatus) {
        store.insert_band(Band::provision(
            TagId::new(id).unwrap(),
            SecretToken::new(secret).unwrap(),
            status,
        ));
    }

    fn band_of(store: &MemoryStore, id: &str) -> Band {
        store
            .get_band(&TagId::new(id).unwrap())
            .unwrap()
            .expect("band should exist")
    }

    // ── Link ─────────────────────────────────────────────────────────

    #[test]
    fn link_activates_and_mirrors() {
        let f = fixture();
        f.lifecycle
            .link("WL-BAND01", f.profile, "band01-secret", f.guardian)
            .unwrap();

        let band = band_of(&f.store, "WL-BAND01");
        assert_eq!(band.status(), BandStatus::Active);
        assert_eq!(band.linked_guardian_id(), Some(f.guardian));
        assert_eq!(band.linked_profile_id(), Some(f.profile));

        let profile = f.store.get_profile(&f.profile).unwrap().unwrap();
        assert_eq!(
            profile.current_band_id,
            Some(TagId::new("WL-BAND01").unwrap())
        );
    }

    #[test]
    fn link_accepts_token_case_insensitively() {
        let f = fixture();
        f.lifecycle
            .link("wl-band01", f.profile, "BAND01-SECRET", f.guardian)
            .unwrap();
        assert_eq!(band_of(&f.store, "WL-BAND01").status(), BandStatus::Active);
    }

    #[test]
    fn second_link_rejected_and_state_unchanged() {
        let f = fixture();
        f.lifecycle
            .link("WL-BAND01", f.profile, "band01-secret", f.guardian)
            .unwrap();

        // Another guardian's profile racing for the same band.
        let other_guardian = GuardianId::new();
        let other_profile = ProfileId::new();
        f.store
            .insert_profile(Profile::new(other_profile, other_guardian, "Noor"));

        let result =
            f.lifecycle
                .link("WL-BAND01", other_profile, "band01-secret", other_guardian);
        assert!(matches!(result, Err(Reject::AlreadyLinked(_))));

        let band = band_of(&f.store, "WL-BAND01");
        assert_eq!(band.linked_profile_id(), Some(f.profile));
        let other = f.store.get_profile(&other_profile).unwrap().unwrap();
        assert!(other.current_band_id.is_none());
    }

    #[test]
    fn link_rejects_wrong_owner() {
        let f = fixture();
        let result = f
            .lifecycle
            .link("WL-BAND01", f.profile, "band01-secret", GuardianId::new());
        assert_eq!(result, Err(Reject::Unauthorized));
        assert_eq!(
            band_of(&f.store, "WL-BAND01").status(),
            BandStatus::Inactive
        );
    }

    #[test]
    fn link_rejects_profile_with_band() {
        let f = fixture();
        f.lifecycle
            .link("WL-BAND01", f.profile, "band01-secret", f.guardian)
            .unwrap();
        seed_band(&f.store, "WL-BAND02", "band02-secret", BandStatus::Inactive);

        let result = f
            .lifecycle
            .link("WL-BAND02", f.profile, "band02-secret", f.guardian);
        assert!(matches!(result, Err(Reject::AlreadyLinked(_))));
        assert_eq!(
            band_of(&f.store, "WL-BAND02").status(),
            BandStatus::Inactive
        );
    }

    #[test]
    fn link_rejects_factory_locked() {
        let f = fixture();
        seed_band(&f.store, "WL-BAND03", "band03-secret", BandStatus::FactoryLocked);
        let result = f
            .lifecycle
            .link("WL-BAND03", f.profile, "band03-secret", f.guardian);
        assert!(matches!(result, Err(Reject::NotAvailable(_))));
    }

    #[test]
    fn link_rejects_unknown_band_and_profile() {
        let f = fixture();
        assert!(matches!(
            f.lifecycle
                .link("WL-GHOST1", f.profile, "band01-secret", f.guardian),
            Err(Reject::NotFound(_))
        ));
        assert!(matches!(
            f.lifecycle
                .link("WL-BAND01", ProfileId::new(), "band01-secret", f.guardian),
            Err(Reject::NotFound(_))
        ));
    }

    #[test]
    fn concurrent_links_activate_exactly_once() {
        let f = fixture();
        let mut handles = Vec::new();
        for i in 0..8 {
            let lifecycle = f.lifecycle.clone();
            let store = Arc::clone(&f.store);
            let guardian = GuardianId::new();
            let profile = ProfileId::new();
            store.insert_profile(Profile::new(profile, guardian, format!("P{i}")));
            handles.push(std::thread::spawn(move || {
                lifecycle.link("WL-BAND01", profile, "band01-secret", guardian)
            }));
        }

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        for failure in results.iter().filter(|r| r.is_err()) {
            assert!(matches!(failure, Err(Reject::AlreadyLinked(_))));
        }

        // Exactly one profile mirrors the band.
        let band = band_of(&f.store, "WL-BAND01");
        assert_eq!(band.status(), BandStatus::Active);
        assert!(band.linked_profile_id().is_some());
    }

    // ── Transfer ─────────────────────────────────────────────────────

    fn linked_fixture() -> Fixture {
        let f = fixture();
        f.lifecycle
            .link("WL-BAND01", f.profile, "band01-secret", f.guardian)
            .unwrap();
        seed_band(&f.store, "WL-BAND02", "band02-secret", BandStatus::Inactive);
        f
    }

    #[test]
    fn transfer_swaps_atomically() {
        let f = linked_fixture();
        f.lifecycle
            .transfer(
                "WL-BAND01",
                "WL-BAND02",
                f.profile,
                "band02-secret",
                f.guardian,
            )
            .unwrap();

        let old = band_of(&f.store, "WL-BAND01");
        assert_eq!(old.status(), BandStatus::Deactivated);
        assert_eq!(old.linked_profile_id(), None);

        let new = band_of(&f.store, "WL-BAND02");
        assert_eq!(new.status(), BandStatus::Active);
        assert_eq!(new.linked_profile_id(), Some(f.profile));

        let profile = f.store.get_profile(&f.profile).unwrap().unwrap();
        assert_eq!(
            profile.current_band_id,
            Some(TagId::new("WL-BAND02").unwrap())
        );
    }

    #[test]
    fn failed_transfer_changes_nothing() {
        let f = linked_fixture();
        // Make the replacement band ineligible.
        f.store.with_transaction(|tx| {
            let mut band = tx.band(&TagId::new("WL-BAND02").unwrap()).unwrap();
            band.set_status(BandStatus::Lost);
            tx.put_band(band);
            Ok(())
        })
        .unwrap();

        let result = f.lifecycle.transfer(
            "WL-BAND01",
            "WL-BAND02",
            f.profile,
            "band02-secret",
            f.guardian,
        );
        assert!(matches!(result, Err(Reject::AlreadyLinked(_))));

        // Neither band nor the profile moved.
        let old = band_of(&f.store, "WL-BAND01");
        assert_eq!(old.status(), BandStatus::Active);
        assert_eq!(old.linked_profile_id(), Some(f.profile));
        let new = band_of(&f.store, "WL-BAND02");
        assert_eq!(new.status(), BandStatus::Lost);
        assert_eq!(new.linked_profile_id(), None);
        let profile = f.store.get_profile(&f.profile).unwrap().unwrap();
        assert_eq!(
            profile.current_band_id,
            Some(TagId::new("WL-BAND01").unwrap())
        );
    }

    #[test]
    fn transfer_rejects_mismatched_current_band() {
        let f = linked_fixture();
        seed_band(&f.store, "WL-BAND04", "band04-secret", BandStatus::Inactive);
        // WL-BAND04 is not the profile's current band.
        let result = f.lifecycle.transfer(
            "WL-BAND04",
            "WL-BAND02",
            f.profile,
            "band02-secret",
            f.guardian,
        );
        assert!(matches!(result, Err(Reject::NotAvailable(_))));
    }

    #[test]
    fn transfer_rejects_wrong_owner() {
        let f = linked_fixture();
        let result = f.lifecycle.transfer(
            "WL-BAND01",
            "WL-BAND02",
            f.profile,
            "band02-secret",
            GuardianId::new(),
        );
        assert_eq!(result, Err(Reject::Unauthorized));
    }

    // ── Unlink ───────────────────────────────────────────────────────

    #[test]
    fn unlink_deactivates_and_clears_mirror() {
        let f = linked_fixture();
        f.lifecycle
            .unlink("WL-BAND01", f.profile, f.guardian)
            .unwrap();

        let band = band_of(&f.store, "WL-BAND01");
        assert_eq!(band.status(), BandStatus::Deactivated);
        assert_eq!(band.linked_guardian_id(), None);
        let profile = f.store.get_profile(&f.profile).unwrap().unwrap();
        assert!(profile.current_band_id.is_none());
    }

    #[test]
    fn unlink_rejects_wrong_owner() {
        let f = linked_fixture();
        assert_eq!(
            f.lifecycle
                .unlink("WL-BAND01", f.profile, GuardianId::new()),
            Err(Reject::Unauthorized)
        );
        assert_eq!(band_of(&f.store, "WL-BAND01").status(), BandStatus::Active);
    }

    // ── Status reports ───────────────────────────────────────────────

    #[tokio::test]
    async fn report_lost_sets_status_and_notifies() {
        let f = linked_fixture();
        f.lifecycle
            .report_lost("WL-BAND01", f.guardian)
            .await
            .unwrap();
        assert_eq!(band_of(&f.store, "WL-BAND01").status(), BandStatus::Lost);
        assert_eq!(f.notifier.titles(), vec!["Band reported lost"]);
    }

    #[tokio::test]
    async fn reactivate_from_lost_notifies_found() {
        let f = linked_fixture();
        f.lifecycle
            .report_lost("WL-BAND01", f.guardian)
            .await
            .unwrap();
        f.lifecycle
            .reactivate("WL-BAND01", f.guardian)
            .await
            .unwrap();
        assert_eq!(band_of(&f.store, "WL-BAND01").status(), BandStatus::Active);
        assert_eq!(
            f.notifier.titles(),
            vec!["Band reported lost", "Band back in service"]
        );
    }

    #[tokio::test]
    async fn repeated_lost_report_does_not_renotify() {
        let f = linked_fixture();
        f.lifecycle
            .report_lost("WL-BAND01", f.guardian)
            .await
            .unwrap();
        f.lifecycle
            .report_lost("WL-BAND01", f.guardian)
            .await
            .unwrap();
        assert_eq!(f.notifier.titles().len(), 1);
    }

    #[tokio::test]
    async fn active_to_active_is_a_silent_noop() {
        let f = linked_fixture();
        f.lifecycle
            .reactivate("WL-BAND01", f.guardian)
            .await
            .unwrap();
        assert_eq!(band_of(&f.store, "WL-BAND01").status(), BandStatus::Active);
        assert!(f.notifier.titles().is_empty());
    }

    #[tokio::test]
    async fn stolen_band_can_be_reactivated_by_owner() {
        // Owner override: no legal-transition table constrains the
        // from-state, so STOLEN back to ACTIVE is allowed.
        let f = linked_fixture();
        f.lifecycle
            .report_stolen("WL-BAND01", f.guardian)
            .await
            .unwrap();
        assert_eq!(band_of(&f.store, "WL-BAND01").status(), BandStatus::Stolen);
        f.lifecycle
            .reactivate("WL-BAND01", f.guardian)
            .await
            .unwrap();
        assert_eq!(band_of(&f.store, "WL-BAND01").status(), BandStatus::Active);
        // STOLEN to ACTIVE is not a LOST recovery: no "found" notice.
        assert!(f.notifier.titles().is_empty());
    }

    #[tokio::test]
    async fn status_report_rejects_non_owner_and_unlinked() {
        let f = linked_fixture();
        assert_eq!(
            f.lifecycle
                .report_lost("WL-BAND01", GuardianId::new())
                .await,
            Err(Reject::Unauthorized)
        );

        // A deactivated band has no linked guardian at all.
        f.lifecycle
            .unlink("WL-BAND01", f.profile, f.guardian)
            .unwrap();
        assert_eq!(
            f.lifecycle.report_lost("WL-BAND01", f.guardian).await,
            Err(Reject::Unauthorized)
        );
    }

    #[tokio::test]
    async fn notification_failure_never_rolls_back_status() {
        let f = fixture_with_notifier(Arc::new(RecordingNotifier::failing()));
        f.lifecycle
            .link("WL-BAND01", f.profile, "band01-secret", f.guardian)
            .unwrap();

        f.lifecycle
            .report_lost("WL-BAND01", f.guardian)
            .await
            .unwrap();
        assert_eq!(band_of(&f.store, "WL-BAND01").status(), BandStatus::Lost);
        // The push was attempted (and failed) without surfacing.
        assert_eq!(f.notifier.titles().len(), 1);
    }

    // ── Owner contact ────────────────────────────────────────────────

    #[tokio::test]
    async fn owner_contact_only_for_lost_band() {
        let f = linked_fixture();
        f.store.with_transaction(|tx| {
            let mut profile = tx.profile(&f.profile).unwrap();
            profile.owner_contact = Some(OwnerContact {
                name: "Sam".to_string(),
                phone: "+15550100".to_string(),
            });
            tx.put_profile(profile);
            Ok(())
        })
        .unwrap();

        assert!(matches!(
            f.lifecycle.owner_contact("WL-BAND01"),
            Err(Reject::NotAvailable(_))
        ));

        f.lifecycle
            .report_lost("WL-BAND01", f.guardian)
            .await
            .unwrap();
        let contact = f.lifecycle.owner_contact("WL-BAND01").unwrap();
        assert_eq!(contact.name, "Sam");
        assert_eq!(contact.phone, "+15550100");
    }

    #[tokio::test]
    async fn owner_contact_missing_details_rejected() {
        let f = linked_fixture();
        f.lifecycle
            .report_lost("WL-BAND01", f.guardian)
            .await
            .unwrap();
        assert!(matches!(
            f.lifecycle.owner_contact("WL-BAND01"),
            Err(Reject::NotAvailable(_))
        ));
    }
}
