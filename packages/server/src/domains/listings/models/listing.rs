use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{GeoPoint, ListingId};
use crate::domains::listings::data::ListingSubmission;

/// 30 statute miles in meters (ST_DWithin on geography takes meters)
pub const NEARBY_RADIUS_METERS: f64 = 48_280.32;

/// Columns selected for every read. The PostGIS `location` column is never
/// returned raw; it is split into latitude/longitude.
const LISTING_COLUMNS: &str = r#"
    id, name, type, tags, phone, email, details, hours, url,
    address, address2, city, state, zipcode, donate_url, giftcard, is_active,
    ST_Y(location::geometry) AS latitude,
    ST_X(location::geometry) AS longitude,
    created_at, updated_at, deleted_at
"#;

/// Listing - a takeout business in the public directory (`restaurants` table)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub listing_type: String,
    pub tags: Vec<String>,

    // Contact
    pub phone: String,
    pub email: String,
    pub url: String,

    // Details
    pub details: String,
    pub hours: String,
    pub donate_url: String,
    pub giftcard: bool,

    // Address
    pub address: String,
    #[serde(rename = "address_2")]
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,

    // Location (0,0 when the address could not be geocoded)
    pub latitude: f64,
    pub longitude: f64,

    // Publication state: false until a moderator approves
    #[serde(rename = "active")]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Listing {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn is_geolocated(&self) -> bool {
        !self.location().is_unresolved()
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Listing {
    /// Insert a new, inactive listing. One atomic statement.
    pub async fn create(
        submission: &ListingSubmission,
        location: GeoPoint,
        pool: &PgPool,
    ) -> Result<ListingId> {
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, ListingId>(
            r#"
            INSERT INTO restaurants (
                name, type, tags, phone, email, details, hours, url,
                address, address2, city, state, zipcode, location,
                donate_url, giftcard, is_active, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8,
                $9, $10, $11, $12, $13,
                ST_SetSRID(ST_MakePoint($14, $15), 4326)::geography,
                $16, $17, FALSE, $18, $18
            )
            RETURNING id
            "#,
        )
        .bind(&submission.name)
        .bind(&submission.listing_type)
        .bind(&submission.tags)
        .bind(&submission.phone)
        .bind(&submission.email)
        .bind(&submission.details)
        .bind(&submission.hours)
        .bind(&submission.url)
        .bind(&submission.address)
        .bind(&submission.address2)
        .bind(&submission.city)
        .bind(&submission.state)
        .bind(&submission.zipcode)
        .bind(location.longitude)
        .bind(location.latitude)
        .bind(&submission.donate_url)
        .bind(submission.giftcard)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Find a listing by id, active or not. Soft-deleted rows are invisible.
    pub async fn find_by_id(id: ListingId, pool: &PgPool) -> Result<Option<Self>> {
        let listing = sqlx::query_as::<_, Self>(&format!(
            "SELECT {LISTING_COLUMNS} FROM restaurants WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(listing)
    }

    /// Published listings ordered by name.
    ///
    /// With a resolved point, only listings within 30 miles (great-circle,
    /// spherical earth) are returned. `None` or the unresolved sentinel lists
    /// everything published.
    pub async fn list_near(point: Option<GeoPoint>, pool: &PgPool) -> Result<Vec<Self>> {
        let listings = match point.filter(|p| !p.is_unresolved()) {
            Some(point) => {
                sqlx::query_as::<_, Self>(&format!(
                    r#"
                    SELECT {LISTING_COLUMNS} FROM restaurants
                    WHERE deleted_at IS NULL
                      AND is_active = TRUE
                      AND ST_DWithin(
                          location,
                          ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography,
                          $3,
                          false
                      )
                    ORDER BY name ASC
                    "#
                ))
                .bind(point.longitude)
                .bind(point.latitude)
                .bind(NEARBY_RADIUS_METERS)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Self>(&format!(
                    r#"
                    SELECT {LISTING_COLUMNS} FROM restaurants
                    WHERE deleted_at IS NULL AND is_active = TRUE
                    ORDER BY name ASC
                    "#
                ))
                .fetch_all(pool)
                .await?
            }
        };
        Ok(listings)
    }

    /// Mark a listing active. Re-activating leaves `updated_at` untouched.
    /// Returns `None` when the listing does not exist or was deleted.
    pub async fn set_active(id: ListingId, pool: &PgPool) -> Result<Option<Self>> {
        let listing = sqlx::query_as::<_, Self>(&format!(
            r#"
            UPDATE restaurants
            SET is_active = TRUE,
                updated_at = CASE WHEN is_active THEN updated_at ELSE $2 END
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {LISTING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await?;
        Ok(listing)
    }
}
