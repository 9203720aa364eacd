//! # Scan Recorder
//!
//! One call per physical read of a band's code. The only thing that can
//! fail the caller is the durable append itself; classification, geocoding,
//! and the downstream guardian notification each sit behind their own
//! failure boundary.
//!
//! The notification tail (band, then linked profile, then guardian, then
//! push) runs on a spawned task after the event is durably written, so the
//! caller's response never waits on the push transport.

use std::sync::Arc;

use wardlink_core::{
    sanitize_location, GeoPoint, Notifier, Reject, ScanEvent, ScanId, TagId, Timestamp,
};
use wardlink_store::{ScanLog, TxStore};

use crate::device::classify_user_agent;
use crate::geocode::{GeoResolver, Placename};

/// Records scan events and triggers best-effort scan notifications.
#[derive(Clone)]
pub struct ScanRecorder<S> {
    store: Arc<S>,
    log: Arc<dyn ScanLog>,
    geocoder: Option<Arc<dyn GeoResolver>>,
    notifier: Arc<dyn Notifier>,
}

impl<S: TxStore> ScanRecorder<S> {
    /// Create a recorder. The geocoder is optional; without one, events
    /// simply never carry city or country.
    pub fn new(
        store: Arc<S>,
        log: Arc<dyn ScanLog>,
        geocoder: Option<Arc<dyn GeoResolver>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            log,
            geocoder,
            notifier,
        }
    }

    /// Record one scan. Rejects only structurally invalid input; every
    /// downstream concern is best-effort.
    pub async fn record_scan(
        &self,
        tag_id: &str,
        location: Option<GeoPoint>,
        user_agent: &str,
    ) -> Result<ScanId, Reject> {
        let band_id = TagId::new(tag_id)?;

        let sanitized = sanitize_location(location);
        if location.is_some() && sanitized.is_none() {
            tracing::warn!(band_id = %band_id, "discarding out-of-range scan coordinates");
        }

        let device = classify_user_agent(user_agent);

        let placename = match (&sanitized, &self.geocoder) {
            (Some(point), Some(geocoder)) => match geocoder.resolve(*point).await {
                Ok(placename) => placename,
                Err(err) => {
                    tracing::warn!(band_id = %band_id, error = %err, "reverse geocoding failed, omitting place");
                    Placename::default()
                }
            },
            _ => Placename::default(),
        };

        let event = ScanEvent {
            id: ScanId::new(),
            band_id: band_id.clone(),
            at: Timestamp::now(),
            location: sanitized,
            city: placename.city.clone(),
            country: placename.country.clone(),
            device,
            is_read: false,
        };

        self.log.append(&event).await.map_err(Reject::from)?;
        tracing::info!(scan_id = %event.id, band_id = %band_id, "scan recorded");

        self.spawn_notification(band_id, placename);
        Ok(event.id)
    }

    /// Kick off the notification tail without holding up the caller.
    fn spawn_notification(&self, band_id: TagId, placename: Placename) {
        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(reason) = notify_scan(store, notifier, &band_id, placename).await {
                tracing::warn!(band_id = %band_id, reason = %reason, "scan notification skipped");
            }
        });
    }
}

/// Resolve band to linked profile to guardian and push. Any failure along
/// the chain aborts the notification, nothing else.
async fn notify_scan<S: TxStore>(
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    band_id: &TagId,
    placename: Placename,
) -> Result<(), String> {
    let band = store
        .get_band(band_id)
        .map_err(|err| err.to_string())?
        .ok_or("band not found")?;
    let profile_id = band
        .linked_profile_id()
        .ok_or("band has no linked profile")?;
    let profile = store
        .get_profile(&profile_id)
        .map_err(|err| err.to_string())?
        .ok_or("linked profile not found")?;
    if profile.display_name.trim().is_empty() {
        return Err("profile has no display name".to_string());
    }

    let body = match placename.label() {
        Some(place) => format!(
            "{}'s band was just scanned near {place}.",
            profile.display_name
        ),
        None => format!("{}'s band was just scanned.", profile.display_name),
    };
    let data = serde_json::json!({
        "band_id": band_id.as_str(),
        "profile_id": profile.id,
    });
    notifier
        .push(profile.parent_id, "Band scanned", &body, data)
        .await
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use wardlink_core::{Band, BandStatus, GuardianId, NotifyError, Profile, ProfileId, SecretToken};
    use wardlink_store::{MemoryScanLog, MemoryStore};

    use crate::geocode::GeocodeError;

    #[derive(Default)]
    struct RecordingNotifier {
        fail: bool,
        bodies: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn push(
            &self,
            _guardian_id: GuardianId,
            _title: &str,
            body: &str,
            _data: serde_json::Value,
        ) -> Result<(), NotifyError> {
            self.bodies.lock().push(body.to_string());
            if self.fail {
                Err(NotifyError::Dispatch("transport down".to_string()))
            } else {
                Ok(())
            }
        }
    }

    struct StubGeo {
        result: Result<Placename, ()>,
    }

    #[async_trait]
    impl GeoResolver for StubGeo {
        async fn resolve(&self, _point: GeoPoint) -> Result<Placename, GeocodeError> {
            self.result
                .clone()
                .map_err(|()| GeocodeError::Request("timed out".to_string()))
        }
    }

    struct Fixture {
        log: Arc<MemoryScanLog>,
        notifier: Arc<RecordingNotifier>,
        recorder: ScanRecorder<MemoryStore>,
        band_id: TagId,
    }

    fn fixture(geocoder: Option<Arc<dyn GeoResolver>>, failing_notifier: bool) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let band_id = TagId::new("WL-SCAN01").unwrap();
        let guardian = GuardianId::new();
        let profile_id = ProfileId::new();

        let mut band = Band::provision(
            band_id.clone(),
            SecretToken::new("scan-secret-1").unwrap(),
            BandStatus::Inactive,
        );
        band.activate_for(guardian, profile_id);
        store.insert_band(band);
        store.insert_profile(Profile::new(profile_id, guardian, "Maya"));

        let log = Arc::new(MemoryScanLog::new());
        let notifier = Arc::new(RecordingNotifier {
            fail: failing_notifier,
            bodies: Mutex::new(Vec::new()),
        });
        let dyn_log: Arc<dyn ScanLog> = log.clone();
        let dyn_notifier: Arc<dyn Notifier> = notifier.clone();
        let recorder = ScanRecorder::new(store, dyn_log, geocoder, dyn_notifier);
        Fixture {
            log,
            notifier,
            recorder,
            band_id,
        }
    }

    const UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Safari/604.1";

    #[tokio::test]
    async fn records_and_returns_scan_id() {
        let f = fixture(None, false);
        let scan_id = f
            .recorder
            .record_scan("wl-scan01", Some(GeoPoint { lat: 38.7, lng: -9.1 }), UA)
            .await
            .unwrap();

        let events = f.log.for_band(&f.band_id).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, scan_id);
        assert!(!events[0].is_read);
        assert_eq!(
            events[0].location,
            Some(GeoPoint { lat: 38.7, lng: -9.1 })
        );
    }

    #[tokio::test]
    async fn invalid_tag_is_the_only_rejection() {
        let f = fixture(None, false);
        let result = f.recorder.record_scan("!!", None, UA).await;
        assert!(matches!(result, Err(Reject::InvalidFormat(_))));
        assert!(f.log.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_location_is_nulled_not_rejected() {
        let f = fixture(None, false);
        f.recorder
            .record_scan("WL-SCAN01", Some(GeoPoint { lat: 200.0, lng: 10.0 }), UA)
            .await
            .unwrap();

        let events = f.log.for_band(&f.band_id).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].location, None);
    }

    #[tokio::test]
    async fn geocoded_place_lands_on_the_event() {
        let geo: Arc<dyn GeoResolver> = Arc::new(StubGeo {
            result: Ok(Placename {
                city: Some("Lisbon".to_string()),
                country: Some("Portugal".to_string()),
            }),
        });
        let f = fixture(Some(geo), false);
        f.recorder
            .record_scan("WL-SCAN01", Some(GeoPoint { lat: 38.7, lng: -9.1 }), UA)
            .await
            .unwrap();

        let events = f.log.for_band(&f.band_id).await.unwrap();
        assert_eq!(events[0].city.as_deref(), Some("Lisbon"));
        assert_eq!(events[0].country.as_deref(), Some("Portugal"));
    }

    #[tokio::test]
    async fn geocoder_failure_omits_place_but_records() {
        let geo: Arc<dyn GeoResolver> = Arc::new(StubGeo { result: Err(()) });
        let f = fixture(Some(geo), false);
        let result = f
            .recorder
            .record_scan("WL-SCAN01", Some(GeoPoint { lat: 38.7, lng: -9.1 }), UA)
            .await;
        assert!(result.is_ok());

        let events = f.log.for_band(&f.band_id).await.unwrap();
        assert_eq!(events[0].city, None);
        assert_eq!(events[0].country, None);
    }

    #[tokio::test]
    async fn failing_notifier_never_fails_the_caller() {
        let f = fixture(None, true);
        let result = f.recorder.record_scan("WL-SCAN01", None, UA).await;
        assert!(result.is_ok());
        assert_eq!(f.log.len(), 1);
    }

    #[tokio::test]
    async fn notification_names_the_profile_and_place() {
        let geo: Arc<dyn GeoResolver> = Arc::new(StubGeo {
            result: Ok(Placename {
                city: Some("Lisbon".to_string()),
                country: None,
            }),
        });
        let f = fixture(Some(geo), false);
        f.recorder
            .record_scan("WL-SCAN01", Some(GeoPoint { lat: 38.7, lng: -9.1 }), UA)
            .await
            .unwrap();

        // Let the spawned notification tail run.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let bodies = f.notifier.bodies.lock().clone();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("Maya"));
        assert!(bodies[0].contains("Lisbon"));
    }

    #[tokio::test]
    async fn unlinked_band_scan_records_without_notification() {
        let f = fixture(None, false);
        // A second band that nothing links to.
        let store = Arc::new(MemoryStore::new());
        let loose = TagId::new("WL-SCAN02").unwrap();
        store.insert_band(Band::provision(
            loose.clone(),
            SecretToken::new("scan-secret-2").unwrap(),
            BandStatus::Inactive,
        ));
        let dyn_log: Arc<dyn ScanLog> = f.log.clone();
        let dyn_notifier: Arc<dyn Notifier> = f.notifier.clone();
        let recorder = ScanRecorder::new(store, dyn_log, None, dyn_notifier);

        recorder.record_scan("WL-SCAN02", None, UA).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(f.notifier.bodies.lock().is_empty());
        assert_eq!(f.log.for_band(&loose).await.unwrap().len(), 1);
    }
}
