//! Test fixtures for creating test data.

use sqlx::PgPool;
use std::sync::atomic::{AtomicU32, Ordering};
use takeout_core::common::{GeoPoint, ListingId};
use takeout_core::domains::listings::{Listing, ListingSubmission};
use takeout_core::kernel::test_dependencies::{TEST_CHANNEL_ID, TEST_TEAM_ID};

/// Degrees of latitude per statute mile
const DEGREES_PER_MILE: f64 = 1.0 / 69.05;

static NEXT_REGION: AtomicU32 = AtomicU32::new(0);
static NEXT_ZIPCODE: AtomicU32 = AtomicU32::new(0);

/// A search center no other test in this binary uses. Centers are 2 degrees
/// of latitude apart, well beyond the 30 mile search radius.
pub fn unique_center() -> GeoPoint {
    let n = NEXT_REGION.fetch_add(1, Ordering::SeqCst);
    GeoPoint::new(-70.0 + 2.0 * f64::from(n), -100.0)
}

/// Five-digit zipcode no other test in this binary uses
pub fn unique_zipcode() -> String {
    let n = NEXT_ZIPCODE.fetch_add(1, Ordering::SeqCst);
    format!("9{:04}", n)
}

/// Point due north of `origin`
pub fn miles_north(origin: GeoPoint, miles: f64) -> GeoPoint {
    GeoPoint::new(origin.latitude + miles * DEGREES_PER_MILE, origin.longitude)
}

pub fn valid_submission(name: &str, zipcode: &str) -> ListingSubmission {
    ListingSubmission {
        name: name.to_string(),
        listing_type: "restaurant".to_string(),
        tags: vec!["pizza".to_string()],
        phone: "605-555-0134".to_string(),
        email: "owner@example.com".to_string(),
        details: "Curbside pickup".to_string(),
        hours: "11-8 daily".to_string(),
        url: "https://example.com".to_string(),
        address: "2700 S Louise Ave".to_string(),
        address2: String::new(),
        city: "Sioux Falls".to_string(),
        state: "SD".to_string(),
        zipcode: zipcode.to_string(),
        donate_url: String::new(),
        giftcard: false,
    }
}

/// Insert a pending listing at `point`
pub async fn create_listing(pool: &PgPool, name: &str, point: GeoPoint) -> ListingId {
    Listing::create(&valid_submission(name, "57106"), point, pool)
        .await
        .expect("Failed to create listing")
}

/// Insert a published listing at `point`
pub async fn create_active_listing(pool: &PgPool, name: &str, point: GeoPoint) -> ListingId {
    let id = create_listing(pool, name, point).await;
    Listing::set_active(id, pool)
        .await
        .expect("Failed to activate listing")
        .expect("listing exists");
    id
}

pub async fn soft_delete(pool: &PgPool, id: ListingId) {
    sqlx::query("UPDATE restaurants SET deleted_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to soft-delete listing");
}

pub async fn insert_zipcode(pool: &PgPool, zipcode: &str, point: GeoPoint) {
    sqlx::query("INSERT INTO zipcodes (zipcode, lat, lng) VALUES ($1, $2, $3)")
        .bind(zipcode)
        .bind(point.latitude)
        .bind(point.longitude)
        .execute(pool)
        .await
        .expect("Failed to insert zipcode");
}

/// Slack interaction payload for a click on `label` from the moderation
/// channel
pub fn slack_click(label: &str, value: &str) -> serde_json::Value {
    slack_click_from(TEST_TEAM_ID, TEST_CHANNEL_ID, label, value)
}

pub fn slack_click_from(team: &str, channel: &str, label: &str, value: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "block_actions",
        "team": {"id": team, "domain": "takeout"},
        "user": {"id": "U0MOD", "username": "jamie.r", "name": "jamie"},
        "channel": {"id": channel, "name": "submissions"},
        "response_url": "https://hooks.slack.com/actions/T0TEST/1/abc",
        "actions": [{
            "action_id": "admin_approve_submission",
            "value": value,
            "type": "button",
            "text": {"type": "plain_text", "text": label}
        }]
    })
}
