use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::GeoPoint;
use crate::kernel::BaseCoordinateCache;

/// Reference record for zipcode lat/lng lookups.
///
/// Loaded administratively; request traffic only reads it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ZipCode {
    pub id: i32,
    pub zipcode: String,
    pub lat: f64,
    pub lng: f64,
}

impl ZipCode {
    pub async fn find_by_code(zipcode: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, zipcode, lat, lng FROM zipcodes WHERE zipcode = $1 LIMIT 1")
            .bind(zipcode)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Coordinate cache backed by the `zipcodes` table
#[derive(Clone)]
pub struct PostgresCoordinateCache {
    pool: PgPool,
}

impl PostgresCoordinateCache {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseCoordinateCache for PostgresCoordinateCache {
    async fn lookup(&self, postal_code: &str) -> Result<Option<GeoPoint>> {
        Ok(ZipCode::find_by_code(postal_code, &self.pool)
            .await?
            .map(|zip| zip.point()))
    }
}
