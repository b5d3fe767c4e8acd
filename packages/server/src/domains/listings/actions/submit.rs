use tracing::{error, info};

use crate::common::{GeoPoint, ListingId};
use crate::domains::listings::data::ListingSubmission;
use crate::domains::listings::errors::ListingError;
use crate::domains::listings::messages::ModerationRequest;
use crate::domains::listings::models::Listing;
use crate::kernel::ServerDeps;

/// Submit a listing for moderation.
///
/// Validates, resolves a location (cached zipcode first, then the full
/// address), inserts the listing inactive and asks the moderation channel to
/// review it. A failed notification is logged and does not undo the insert.
pub async fn submit_listing(
    submission: ListingSubmission,
    deps: &ServerDeps,
) -> Result<ListingId, ListingError> {
    let submission = submission.normalized();
    submission.validate()?;

    let location = deps
        .resolver
        .resolve_listing_address(
            &submission.street(),
            &submission.city,
            &submission.state,
            &submission.zipcode,
        )
        .await
        .map_err(ListingError::Resolution)?
        .unwrap_or(GeoPoint::UNRESOLVED);

    let listing_id = Listing::create(&submission, location, &deps.db_pool)
        .await
        .map_err(ListingError::Persistence)?;

    info!(
        listing_id = %listing_id,
        geolocated = !location.is_unresolved(),
        "Listing submitted for moderation"
    );

    let request =
        ModerationRequest::for_submission(listing_id, &submission, location, deps.is_production);
    if let Err(e) = deps.notifier.notify(&request.to_slack_message()).await {
        error!(
            error = %e,
            listing_id = %listing_id,
            "Failed to send moderation request; listing stays pending"
        );
    }

    Ok(listing_id)
}
