//! Public directory routes: submit, proximity list, fetch one.

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::common::{GeoPoint, ListingId};
use crate::domains::listings::{submit_listing, Listing, ListingSubmission};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

/// Query string of `GET /restaurants/`.
/// Values are kept as text; anything that does not parse counts as zero.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub zipcode: Option<String>,
}

/// Where a list request searches
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchArea<'a> {
    /// Filter around explicit coordinates
    Point(GeoPoint),
    /// Filter around the zipcode's location
    Zipcode(&'a str),
    /// No filter
    Everywhere,
}

impl ListParams {
    fn coordinate(value: &Option<String>) -> f64 {
        value
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    fn point(&self) -> GeoPoint {
        GeoPoint::new(Self::coordinate(&self.lat), Self::coordinate(&self.lng))
    }

    fn zipcode(&self) -> Option<&str> {
        self.zipcode
            .as_deref()
            .map(str::trim)
            .filter(|z| !z.is_empty())
    }

    /// Both coordinates must be non-zero to filter by distance. The zipcode
    /// is consulted only when both are zero; a lone coordinate filters
    /// nothing.
    pub fn search_area(&self) -> SearchArea<'_> {
        let point = self.point();
        if point.latitude != 0.0 && point.longitude != 0.0 {
            return SearchArea::Point(point);
        }
        match self.zipcode() {
            Some(zipcode) if point.is_unresolved() => SearchArea::Zipcode(zipcode),
            _ => SearchArea::Everywhere,
        }
    }
}

/// `POST /restaurants/`: 201 with the new id followed by a newline
pub async fn create_restaurant(
    Extension(state): Extension<AxumAppState>,
    body: Bytes,
) -> Result<(StatusCode, String), ApiError> {
    let submission: ListingSubmission =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let id = submit_listing(submission, &state.server_deps).await?;

    Ok((StatusCode::CREATED, format!("{}\n", id)))
}

/// `GET /restaurants/?lat=&lng=&zipcode=`
///
/// See `ListParams::search_area` for how the query picks a search point.
/// An unresolved zipcode lists every published listing.
pub async fn list_restaurants(
    Extension(state): Extension<AxumAppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let deps = &state.server_deps;

    let filter = match params.search_area() {
        SearchArea::Point(point) => Some(point),
        SearchArea::Zipcode(zipcode) => deps
            .resolver
            .resolve_by_postal_code(zipcode)
            .await
            .map_err(|e| ApiError::query_failed(&e))?,
        SearchArea::Everywhere => None,
    };
    debug!(?filter, "Listing restaurants");

    let listings = Listing::list_near(filter, &deps.db_pool)
        .await
        .map_err(|e| ApiError::query_failed(&e))?;

    Ok(Json(listings))
}

/// `GET /restaurants/{id}`: pending listings are fetchable by id, deleted
/// ones are not
pub async fn get_restaurant(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, ApiError> {
    let id: ListingId = id.trim().parse().map_err(|_| ApiError::NotFound)?;

    Listing::find_by_id(id, &state.server_deps.db_pool)
        .await
        .map_err(|e| ApiError::query_failed(&e))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
