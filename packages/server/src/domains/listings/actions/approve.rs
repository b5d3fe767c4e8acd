use tracing::{info, warn};

use crate::common::utils::{is_slack_response_url, SlackMessage};
use crate::common::ListingId;
use crate::domains::listings::errors::ListingError;
use crate::domains::listings::messages::approval_confirmation;
use crate::domains::listings::models::Listing;
use crate::kernel::ServerDeps;

/// Publish a pending listing on behalf of a moderator.
///
/// `token` is the listing id as carried by the Slack approval button.
/// The confirmation goes to the interaction's `response_url` when Slack
/// issued one, otherwise to the moderation channel. Approving an
/// already-active listing succeeds again and re-confirms.
pub async fn approve_listing(
    token: &str,
    actor_name: &str,
    response_url: Option<&str>,
    deps: &ServerDeps,
) -> Result<Listing, ListingError> {
    let listing_id: ListingId = token
        .parse()
        .map_err(|_| ListingError::InvalidToken(token.to_string()))?;

    let listing = Listing::set_active(listing_id, &deps.db_pool)
        .await
        .map_err(ListingError::Persistence)?
        .ok_or(ListingError::NotFound(listing_id))?;

    info!(listing_id = %listing_id, approved_by = %actor_name, "Listing approved");

    let confirmation = approval_confirmation(&listing.name, actor_name);
    let channel_message = SlackMessage::text(confirmation.text.clone());
    let sent = match response_url.filter(|url| !url.is_empty()) {
        Some(url) if is_slack_response_url(url) => deps.notifier.respond(url, &confirmation).await,
        Some(url) => {
            warn!(listing_id = %listing_id, response_url = %url, "Ignoring non-Slack response_url");
            deps.notifier.notify(&channel_message).await
        }
        None => deps.notifier.notify(&channel_message).await,
    };
    if let Err(e) = sent {
        warn!(error = %e, listing_id = %listing_id, "Failed to send approval confirmation");
    }

    Ok(listing)
}
