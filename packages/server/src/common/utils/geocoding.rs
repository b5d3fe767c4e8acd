use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::common::{AddressQuery, GeoPoint};
use crate::kernel::BaseGeocoder;

const GEOCODIO_URL: &str = "https://api.geocod.io/v1.4/geocode";

/// Geocodio API response for forward geocoding
#[derive(Debug, Deserialize)]
struct GeocodioResponse {
    #[serde(default)]
    results: Vec<GeocodioResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodioResult {
    location: GeocodioLocation,
}

#[derive(Debug, Deserialize)]
struct GeocodioLocation {
    lat: f64,
    lng: f64,
}

impl GeocodioResponse {
    /// Candidates in provider order (most accurate first)
    fn into_candidates(self) -> Vec<GeoPoint> {
        self.results
            .into_iter()
            .map(|result| GeoPoint::new(result.location.lat, result.location.lng))
            .collect()
    }
}

/// Geocodio forward-geocoding client (paid, per-lookup billing)
pub struct GeocodioClient {
    api_key: String,
    client: reqwest::Client,
}

impl GeocodioClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_key,
            client,
        })
    }

    /// Query parameters for the non-empty address fragments
    fn query_params<'a>(&'a self, query: &'a AddressQuery) -> Vec<(&'static str, &'a str)> {
        let mut params: Vec<(&'static str, &'a str)> = [
            ("street", query.street.as_str()),
            ("city", query.city.as_str()),
            ("state", query.state.as_str()),
            ("postal_code", query.postal_code.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();
        params.push(("api_key", self.api_key.as_str()));
        params
    }
}

#[async_trait]
impl BaseGeocoder for GeocodioClient {
    #[instrument(skip(self), fields(postal_code = %query.postal_code))]
    async fn geocode(&self, query: &AddressQuery) -> Result<Vec<GeoPoint>> {
        let response = self
            .client
            .get(GEOCODIO_URL)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the api_key
                let e = e.without_url();
                error!(error = %e, "Geocoding API request failed");
                anyhow!("Geocoding API request failed: {}", e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Geocoding API returned an error");
            anyhow::bail!("Geocoding API error {}: {}", status, body);
        }

        let parsed: GeocodioResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!(error = %e, "Failed to parse geocoding response");
            anyhow!("Failed to parse geocoding response: {}", e)
        })?;

        let candidates = parsed.into_candidates();
        debug!(candidates = candidates.len(), "Geocoding complete");
        Ok(candidates)
    }
}

/// Calculate distance between two coordinates in kilometers
///
/// Uses Haversine formula for accuracy on Earth's surface
///
/// # Arguments
/// * `lat1`, `lng1` - First coordinate
/// * `lat2`, `lng2` - Second coordinate
///
/// # Returns
/// Distance in kilometers
pub fn calculate_distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
