//! # Append-Only Scan Log
//!
//! Scan events live outside the band/profile transaction boundary: a scan
//! is recorded no matter what the lifecycle machinery later decides. The
//! log is append-only; `mark_read` flips the one mutable flag.

use async_trait::async_trait;
use parking_lot::RwLock;

use wardlink_core::{ScanEvent, ScanId, StoreError, TagId};

/// Durable destination for scan events.
///
/// Implementations: [`MemoryScanLog`] here, and the PostgreSQL-backed log
/// in the API crate when `DATABASE_URL` is configured.
#[async_trait]
pub trait ScanLog: Send + Sync {
    /// Append one immutable event.
    async fn append(&self, event: &ScanEvent) -> Result<(), StoreError>;

    /// All events for a band, newest first.
    async fn for_band(&self, band_id: &TagId) -> Result<Vec<ScanEvent>, StoreError>;

    /// Flip the dashboard read flag. Returns whether the event existed.
    async fn mark_read(&self, id: &ScanId) -> Result<bool, StoreError>;
}

/// In-memory scan log for development and tests.
#[derive(Debug, Default)]
pub struct MemoryScanLog {
    events: RwLock<Vec<ScanEvent>>,
}

impl MemoryScanLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl ScanLog for MemoryScanLog {
    async fn append(&self, event: &ScanEvent) -> Result<(), StoreError> {
        self.events.write().push(event.clone());
        Ok(())
    }

    async fn for_band(&self, band_id: &TagId) -> Result<Vec<ScanEvent>, StoreError> {
        let mut events: Vec<ScanEvent> = self
            .events
            .read()
            .iter()
            .filter(|e| &e.band_id == band_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.at.cmp(&a.at));
        Ok(events)
    }

    async fn mark_read(&self, id: &ScanId) -> Result<bool, StoreError> {
        let mut events = self.events.write();
        match events.iter_mut().find(|e| &e.id == id) {
            Some(event) => {
                event.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
