//! Moderation gateway: turns a Slack interaction callback into a workflow
//! call and an outcome the HTTP layer can render.

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::common::utils::SlackText;
use crate::domains::listings::{approval_confirmation, approve_listing, ListingError, APPROVE_LABEL};
use crate::domains::moderation::data::InteractionPayload;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, PartialEq)]
pub enum ModerationOutcome {
    /// Callback did not come from the moderation team/channel
    Unauthorized,
    /// Malformed payload, no actions, or an unusable approval token
    BadRequest,
    /// Some other button; nothing to do
    Acknowledged,
    /// Listing is live; the confirmation is echoed back to Slack
    Approved(SlackText),
    /// Workflow failed; `reference` is logged alongside the cause
    Failed { reference: Uuid },
}

/// Handle one interaction callback (the decoded `payload` form field).
pub async fn handle_callback(payload: &str, deps: &ServerDeps) -> ModerationOutcome {
    let interaction: InteractionPayload = match serde_json::from_str(payload) {
        Ok(interaction) => interaction,
        Err(e) => {
            warn!(error = %e, payload = %payload, "Could not decode Slack interaction payload");
            return ModerationOutcome::BadRequest;
        }
    };

    if interaction.team.id != deps.moderation.team_id
        || interaction.channel.id != deps.moderation.channel_id
    {
        warn!(
            team_id = %interaction.team.id,
            channel_id = %interaction.channel.id,
            "Rejected Slack callback from unexpected team or channel"
        );
        return ModerationOutcome::Unauthorized;
    }

    let Some(action) = interaction.first_action() else {
        warn!("Slack callback carried no actions");
        return ModerationOutcome::BadRequest;
    };

    if action.text.text != APPROVE_LABEL {
        info!(label = %action.text.text, "Ignoring non-approval Slack action");
        return ModerationOutcome::Acknowledged;
    }

    let actor = interaction.actor_name();
    match approve_listing(
        &action.value,
        actor,
        Some(interaction.response_url.as_str()),
        deps,
    )
    .await
    {
        Ok(listing) => ModerationOutcome::Approved(approval_confirmation(&listing.name, actor)),
        Err(ListingError::InvalidToken(token)) => {
            warn!(token = %token, "Slack approval carried an invalid listing id");
            ModerationOutcome::BadRequest
        }
        Err(e) => {
            let reference = Uuid::new_v4();
            error!(error = %e, reference = %reference, token = %action.value, "Failed to approve listing");
            ModerationOutcome::Failed { reference }
        }
    }
}
