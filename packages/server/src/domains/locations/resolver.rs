//! Location resolution: zipcode cache first, paid geocoder second.
//!
//! `Ok(None)` means "unresolved": the provider answered but had no match.
//! Callers store that as the `GeoPoint::UNRESOLVED` sentinel. `Err` means the
//! cache or provider could not be consulted at all.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::common::{AddressQuery, GeoPoint};
use crate::kernel::{BaseCoordinateCache, BaseGeocoder};

#[derive(Clone)]
pub struct GeocodingResolver {
    cache: Arc<dyn BaseCoordinateCache>,
    geocoder: Arc<dyn BaseGeocoder>,
}

impl GeocodingResolver {
    pub fn new(cache: Arc<dyn BaseCoordinateCache>, geocoder: Arc<dyn BaseGeocoder>) -> Self {
        Self { cache, geocoder }
    }

    /// Resolve a street address with a single provider call.
    /// The first candidate wins; providers rank by confidence.
    pub async fn resolve_address(
        &self,
        street: &str,
        city: &str,
        state: &str,
        postal_code: &str,
    ) -> Result<Option<GeoPoint>> {
        let query = AddressQuery {
            street: street.trim().to_string(),
            city: city.trim().to_string(),
            state: state.trim().to_string(),
            postal_code: postal_code.trim().to_string(),
        };

        let candidates = self.geocoder.geocode(&query).await?;
        let point = candidates.into_iter().next();

        if point.is_none() {
            debug!(postal_code = %query.postal_code, "Geocoder returned no candidates");
        }
        Ok(point)
    }

    /// Resolve a submitted address. A cached zipcode point wins; on a miss the
    /// full address is geocoded.
    pub async fn resolve_listing_address(
        &self,
        street: &str,
        city: &str,
        state: &str,
        postal_code: &str,
    ) -> Result<Option<GeoPoint>> {
        if let Some(point) = self.cache.lookup(postal_code.trim()).await? {
            debug!(postal_code = %postal_code, "Using cached zipcode location");
            return Ok(Some(point));
        }

        self.resolve_address(street, city, state, postal_code).await
    }

    /// Resolve a zipcode, falling back to a postal-code-only provider lookup
    /// on a cache miss.
    pub async fn resolve_by_postal_code(&self, postal_code: &str) -> Result<Option<GeoPoint>> {
        if let Some(point) = self.cache.lookup(postal_code).await? {
            return Ok(Some(point));
        }

        warn!(postal_code = %postal_code, "Zipcode cache miss, geocoding zipcode");
        self.resolve_address("", "", "", postal_code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockCoordinateCache, MockGeocoder};

    fn resolver(
        cache: MockCoordinateCache,
        geocoder: MockGeocoder,
    ) -> (GeocodingResolver, Arc<MockCoordinateCache>, Arc<MockGeocoder>) {
        let cache = Arc::new(cache);
        let geocoder = Arc::new(geocoder);
        (
            GeocodingResolver::new(cache.clone(), geocoder.clone()),
            cache,
            geocoder,
        )
    }

    #[tokio::test]
    async fn cached_zipcode_skips_provider() {
        let (resolver, cache, geocoder) = resolver(
            MockCoordinateCache::new().with_entry("57106", GeoPoint::new(43.5, -96.7)),
            MockGeocoder::new().with_candidates(vec![GeoPoint::new(1.0, 1.0)]),
        );

        let point = resolver.resolve_by_postal_code("57106").await.unwrap();

        assert_eq!(point, Some(GeoPoint::new(43.5, -96.7)));
        assert_eq!(cache.lookups(), vec!["57106".to_string()]);
        assert_eq!(geocoder.call_count(), 0);
    }

    #[tokio::test]
    async fn cache_miss_falls_back_to_postal_code_lookup() {
        let (resolver, _, geocoder) = resolver(
            MockCoordinateCache::new().with_entry("57106", GeoPoint::new(43.5, -96.7)),
            MockGeocoder::new().with_candidates(vec![GeoPoint::new(44.98, -93.27)]),
        );

        let point = resolver.resolve_by_postal_code("55401").await.unwrap();

        assert_eq!(point, Some(GeoPoint::new(44.98, -93.27)));
        assert_eq!(geocoder.calls(), vec![AddressQuery::postal_code_only("55401")]);
    }

    #[tokio::test]
    async fn cache_is_exact_match_only() {
        let (resolver, _, geocoder) = resolver(
            MockCoordinateCache::new().with_entry("57106", GeoPoint::new(43.5, -96.7)),
            MockGeocoder::new(),
        );

        let point = resolver.resolve_by_postal_code("57106-1234").await.unwrap();

        assert_eq!(point, None);
        assert_eq!(geocoder.call_count(), 1);
    }

    #[tokio::test]
    async fn zero_candidates_is_unresolved_not_error() {
        let (resolver, _, _) = resolver(MockCoordinateCache::new(), MockGeocoder::new());

        let point = resolver
            .resolve_address("1 Nowhere Rd", "Atlantis", "ZZ", "00000")
            .await
            .unwrap();

        assert_eq!(point, None);
    }

    #[tokio::test]
    async fn first_candidate_wins() {
        let (resolver, _, geocoder) = resolver(
            MockCoordinateCache::new(),
            MockGeocoder::new().with_candidates(vec![
                GeoPoint::new(43.54, -96.73),
                GeoPoint::new(43.60, -96.80),
            ]),
        );

        let point = resolver
            .resolve_address("101 S Phillips Ave ", "Sioux Falls", "SD", "57104")
            .await
            .unwrap();

        assert_eq!(point, Some(GeoPoint::new(43.54, -96.73)));
        assert_eq!(geocoder.calls()[0].street, "101 S Phillips Ave");
    }

    #[tokio::test]
    async fn listing_address_prefers_cached_zipcode() {
        let (resolver, _, geocoder) = resolver(
            MockCoordinateCache::new().with_entry("57106", GeoPoint::new(43.5, -96.7)),
            MockGeocoder::new().with_candidates(vec![GeoPoint::new(43.51, -96.74)]),
        );

        let point = resolver
            .resolve_listing_address("2700 S Louise Ave", "Sioux Falls", "SD", "57106")
            .await
            .unwrap();

        assert_eq!(point, Some(GeoPoint::new(43.5, -96.7)));
        assert_eq!(geocoder.call_count(), 0);
    }

    #[tokio::test]
    async fn listing_address_miss_geocodes_full_address() {
        let (resolver, _, geocoder) = resolver(
            MockCoordinateCache::new(),
            MockGeocoder::new().with_candidates(vec![GeoPoint::new(43.51, -96.74)]),
        );

        let point = resolver
            .resolve_listing_address("2700 S Louise Ave", "Sioux Falls", "SD", "57106")
            .await
            .unwrap();

        assert_eq!(point, Some(GeoPoint::new(43.51, -96.74)));
        let calls = geocoder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].street, "2700 S Louise Ave");
        assert_eq!(calls[0].city, "Sioux Falls");
    }

    #[tokio::test]
    async fn provider_failure_is_an_error() {
        let (resolver, _, geocoder) = resolver(MockCoordinateCache::new(), MockGeocoder::failing());

        let result = resolver.resolve_by_postal_code("57106").await;

        assert!(result.is_err());
        // No retries
        assert_eq!(geocoder.call_count(), 1);
    }
}
