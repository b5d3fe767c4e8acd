// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (resolution order, approval rules) lives in domain functions
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseGeocoder, BaseNotifier)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::utils::{SlackMessage, SlackText};
use crate::common::{AddressQuery, GeoPoint};

// =============================================================================
// Geocoding Trait (Infrastructure - external provider)
// =============================================================================

#[async_trait]
pub trait BaseGeocoder: Send + Sync {
    /// Forward-geocode the non-empty fragments of `query`.
    ///
    /// Returns candidates ranked by the provider (best first). An empty vector
    /// is a valid "no match" answer; `Err` means the provider could not be
    /// reached or answered with something other than a result set.
    async fn geocode(&self, query: &AddressQuery) -> Result<Vec<GeoPoint>>;
}

// =============================================================================
// Coordinate Cache Trait (Infrastructure - zipcode reference data)
// =============================================================================

#[async_trait]
pub trait BaseCoordinateCache: Send + Sync {
    /// Exact-match lookup; `None` means "not cached", not an error
    async fn lookup(&self, postal_code: &str) -> Result<Option<GeoPoint>>;
}

// =============================================================================
// Notification Trait (Infrastructure - moderation chat channel)
// =============================================================================

/// One-way, best-effort notification sink.
///
/// Delivery is at most once. Callers log failures and carry on; a failed
/// notification never changes the result of the operation that sent it.
#[async_trait]
pub trait BaseNotifier: Send + Sync {
    /// Post a message to the moderation channel
    async fn notify(&self, message: &SlackMessage) -> Result<()>;

    /// Reply to an interaction through its `response_url`
    async fn respond(&self, response_url: &str, reply: &SlackText) -> Result<()>;
}
