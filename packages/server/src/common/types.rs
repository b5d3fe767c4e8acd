// Common types used across multiple domains and layers
//
// These types are shared between the kernel and domain layers to avoid
// circular dependencies while maintaining type safety.

use serde::{Deserialize, Serialize};

use super::utils::calculate_distance_km;

const KM_PER_MILE: f64 = 1.609344;

/// A point on the earth's surface in WGS84 degrees.
///
/// `(0, 0)` is reserved: it marks a location that could not be resolved and
/// is never treated as a real position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Sentinel for "location not resolved"
    pub const UNRESOLVED: GeoPoint = GeoPoint {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Great-circle distance in statute miles
    pub fn distance_miles(&self, other: &GeoPoint) -> f64 {
        calculate_distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        ) / KM_PER_MILE
    }
}

/// Address fragments handed to a geocoding provider.
///
/// Empty fragments are left out of the provider request, so a query with only
/// `postal_code` set is a postal-code lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressQuery {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl AddressQuery {
    pub fn postal_code_only(postal_code: &str) -> Self {
        Self {
            postal_code: postal_code.to_string(),
            ..Default::default()
        }
    }
}
