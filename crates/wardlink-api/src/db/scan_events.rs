//! Scan event persistence.
//!
//! The PostgreSQL-backed [`ScanLog`] implementation. One row per event on
//! the `scan_events` table; only `is_read` is ever updated after insert.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use wardlink_core::{
    Browser, DeviceInfo, DeviceKind, GeoPoint, Os, ScanEvent, ScanId, StoreError, TagId, Timestamp,
};
use wardlink_store::ScanLog;

/// SQLx-backed scan log.
#[derive(Debug, Clone)]
pub struct PgScanLog {
    pool: PgPool,
}

impl PgScanLog {
    /// Wrap a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_err(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl ScanLog for PgScanLog {
    async fn append(&self, event: &ScanEvent) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO scan_events (id, band_id, at, lat, lng, city, country,
             device, browser, os, is_read)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(*event.id.as_uuid())
        .bind(event.band_id.as_str())
        .bind(*event.at.as_datetime())
        .bind(event.location.map(|l| l.lat))
        .bind(event.location.map(|l| l.lng))
        .bind(&event.city)
        .bind(&event.country)
        .bind(event.device.device.as_str())
        .bind(event.device.browser.as_str())
        .bind(event.device.os.as_str())
        .bind(event.is_read)
        .execute(&self.pool)
        .await
        .map_err(|err| StoreError::WriteFailed(err.to_string()))?;
        Ok(())
    }

    async fn for_band(&self, band_id: &TagId) -> Result<Vec<ScanEvent>, StoreError> {
        let rows = sqlx::query_as::<_, ScanEventRow>(
            "SELECT id, band_id, at, lat, lng, city, country, device, browser, os, is_read
             FROM scan_events WHERE band_id = $1 ORDER BY at DESC",
        )
        .bind(band_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_event() {
                Some(event) => events.push(event),
                None => {
                    tracing::error!("skipping scan event row with an invalid band serial");
                }
            }
        }
        Ok(events)
    }

    async fn mark_read(&self, id: &ScanId) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE scan_events SET is_read = TRUE WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::WriteFailed(err.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}

fn parse_device(s: &str) -> DeviceKind {
    match s {
        "mobile" => DeviceKind::Mobile,
        "tablet" => DeviceKind::Tablet,
        "desktop" => DeviceKind::Desktop,
        other => {
            if other != "unknown" {
                tracing::warn!(device = other, "unknown device kind in database");
            }
            DeviceKind::Unknown
        }
    }
}

fn parse_browser(s: &str) -> Browser {
    match s {
        "chrome" => Browser::Chrome,
        "safari" => Browser::Safari,
        "firefox" => Browser::Firefox,
        "edge" => Browser::Edge,
        _ => Browser::Other,
    }
}

fn parse_os(s: &str) -> Os {
    match s {
        "ios" => Os::Ios,
        "android" => Os::Android,
        "windows" => Os::Windows,
        "mac_os" => Os::MacOs,
        "linux" => Os::Linux,
        _ => Os::Other,
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct ScanEventRow {
    id: Uuid,
    band_id: String,
    at: DateTime<Utc>,
    lat: Option<f64>,
    lng: Option<f64>,
    city: Option<String>,
    country: Option<String>,
    device: String,
    browser: String,
    os: String,
    is_read: bool,
}

impl ScanEventRow {
    fn into_event(self) -> Option<ScanEvent> {
        let band_id = match TagId::new(self.band_id.clone()) {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(
                    id = %self.id,
                    band_id = %self.band_id,
                    "scan event row has an invalid band serial"
                );
                return None;
            }
        };
        let location = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        };
        Some(ScanEvent {
            id: ScanId::from_uuid(self.id),
            band_id,
            at: Timestamp::from_datetime(self.at),
            location,
            city: self.city,
            country: self.country,
            device: DeviceInfo {
                device: parse_device(&self.device),
                browser: parse_browser(&self.browser),
                os: parse_os(&self.os),
            },
            is_read: self.is_read,
        })
    }
}
