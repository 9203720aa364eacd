//! # Reverse Geocoding Collaborator
//!
//! Turns sanitized coordinates into a human-readable place name for scan
//! notifications. The endpoint host must be on the configured allow-list;
//! the client refuses to be constructed against anything else, so a
//! misconfigured or attacker-supplied URL can never turn this into a
//! request-forgery primitive.
//!
//! Resolution failures are expected and tolerated: the scan event simply
//! omits city and country.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use wardlink_core::GeoPoint;

/// City/country pair from a successful resolution. Either side may be
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placename {
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Placename {
    /// A single human-readable string, when anything resolved.
    pub fn label(&self) -> Option<String> {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => Some(format!("{city}, {country}")),
            (Some(city), None) => Some(city.clone()),
            (None, Some(country)) => Some(country.clone()),
            (None, None) => None,
        }
    }
}

/// Errors from the geocoding collaborator.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// The endpoint URL did not parse or has no host.
    #[error("geocoding endpoint is invalid: {0}")]
    InvalidEndpoint(String),

    /// The endpoint host is not on the allow-list.
    #[error("geocoding host '{0}' is not allow-listed")]
    HostNotAllowed(String),

    /// The request failed or returned an unusable response.
    #[error("geocoding request failed: {0}")]
    Request(String),
}

/// Coordinate-to-placename resolver seam.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Resolve a point to a place name.
    async fn resolve(&self, point: GeoPoint) -> Result<Placename, GeocodeError>;
}

/// HTTP reverse geocoder: POST `{lat, lng}`, receive `{city?, country?}`.
#[derive(Debug, Clone)]
pub struct HttpReverseGeocoder {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Serialize)]
struct GeocodeRequest {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    city: Option<String>,
    country: Option<String>,
}

impl HttpReverseGeocoder {
    /// Request timeout. Scan recording must not hang on a slow resolver.
    const TIMEOUT: Duration = Duration::from_secs(5);

    /// Build a geocoder for an endpoint whose host is allow-listed.
    pub fn new(endpoint: &str, allowed_hosts: &[String]) -> Result<Self, GeocodeError> {
        let endpoint =
            Url::parse(endpoint).map_err(|err| GeocodeError::InvalidEndpoint(err.to_string()))?;
        let host = endpoint
            .host_str()
            .ok_or_else(|| GeocodeError::InvalidEndpoint("endpoint has no host".to_string()))?;
        if !allowed_hosts.iter().any(|h| h.eq_ignore_ascii_case(host)) {
            return Err(GeocodeError::HostNotAllowed(host.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|err| GeocodeError::Request(err.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl GeoResolver for HttpReverseGeocoder {
    async fn resolve(&self, point: GeoPoint) -> Result<Placename, GeocodeError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GeocodeRequest {
                lat: point.lat,
                lng: point.lng,
            })
            .send()
            .await
            .map_err(|err| GeocodeError::Request(err.to_string()))?
            .error_for_status()
            .map_err(|err| GeocodeError::Request(err.to_string()))?;

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|err| GeocodeError::Request(err.to_string()))?;
        Ok(Placename {
            city: body.city,
            country: body.country,
        })
    }
}
