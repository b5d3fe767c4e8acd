//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container shared by every
//! request handler. All external services use trait abstractions so tests can
//! swap in the mocks from `test_dependencies`.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::ModerationConfig;
use crate::domains::locations::GeocodingResolver;
use crate::kernel::{BaseCoordinateCache, BaseGeocoder, BaseNotifier};

/// Server dependencies accessible to actions and routes
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub resolver: GeocodingResolver,
    pub notifier: Arc<dyn BaseNotifier>,
    /// Expected Slack team/channel for moderation callbacks
    pub moderation: ModerationConfig,
    /// Outside production, moderation messages are flagged as tests
    pub is_production: bool,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        coordinate_cache: Arc<dyn BaseCoordinateCache>,
        geocoder: Arc<dyn BaseGeocoder>,
        notifier: Arc<dyn BaseNotifier>,
        moderation: ModerationConfig,
        is_production: bool,
    ) -> Self {
        Self {
            db_pool,
            resolver: GeocodingResolver::new(coordinate_cache, geocoder),
            notifier,
            moderation,
            is_production,
        }
    }
}
