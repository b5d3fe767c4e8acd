//! Slack messages emitted by the publication workflow.

use crate::common::utils::{SlackBlock, SlackButton, SlackMessage, SlackText};
use crate::common::{GeoPoint, ListingId};
use crate::domains::listings::data::ListingSubmission;

/// Label on the approval button; the moderation gateway matches on it.
pub const APPROVE_LABEL: &str = "Approve";

/// `action_id` of the approval button
pub const APPROVE_ACTION_ID: &str = "admin_approve_submission";

const TEST_PREFIX: &str = "**THIS IS A TEST** ";

/// A request for a moderator to review one new listing.
/// Lives only for the duration of one notify call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationRequest {
    pub listing_id: ListingId,
    pub listing_name: String,
    pub summary: String,
    /// Returned verbatim by Slack when the moderator clicks Approve
    pub approval_token: String,
    fields: Vec<SlackText>,
    details: String,
}

impl ModerationRequest {
    pub fn for_submission(
        listing_id: ListingId,
        submission: &ListingSubmission,
        location: GeoPoint,
        is_production: bool,
    ) -> Self {
        let listing_name = if is_production {
            submission.name.clone()
        } else {
            format!("{}{}", TEST_PREFIX, submission.name)
        };

        let geolocated = if location.is_unresolved() {
            "Is NOT Geolocated"
        } else {
            "Is Geolocated"
        };

        let summary = format!(
            "A new business has been SUBMITTED:\n*{}*\n{} {}\n{}, {} {}\n({})\n\nEmail: {} - Phone: {}\nURL: {}",
            listing_name,
            submission.address,
            submission.address2,
            submission.city,
            submission.state,
            submission.zipcode,
            geolocated,
            submission.email,
            submission.phone,
            submission.url,
        );

        let fields = vec![
            SlackText::mrkdwn(format!(
                "*Type:*\n{} ({})",
                submission.listing_type,
                submission.tags.join(", ")
            )),
            SlackText::mrkdwn(format!("*Hours:*\n{}", submission.hours)),
            SlackText::mrkdwn(format!(
                "*Offers Giftcard:*\n{}",
                if submission.giftcard { "Yes" } else { "No" }
            )),
        ];

        Self {
            listing_id,
            listing_name,
            summary,
            approval_token: listing_id.to_string(),
            fields,
            details: submission.details.clone(),
        }
    }

    pub fn to_slack_message(&self) -> SlackMessage {
        let mut blocks = vec![
            SlackBlock::Section {
                text: Some(SlackText::mrkdwn(&self.summary)),
                fields: None,
            },
            SlackBlock::Section {
                text: None,
                fields: Some(self.fields.clone()),
            },
            SlackBlock::Divider,
        ];

        // Slack rejects sections with empty text
        if !self.details.trim().is_empty() {
            blocks.push(SlackBlock::Section {
                text: Some(SlackText::mrkdwn(&self.details)),
                fields: None,
            });
        }

        blocks.push(SlackBlock::Actions {
            elements: vec![SlackButton::primary(
                APPROVE_ACTION_ID,
                APPROVE_LABEL,
                &self.approval_token,
            )],
        });

        SlackMessage {
            text: Some(format!("New submission: {}", self.listing_name)),
            blocks,
        }
    }
}

/// Reply posted back to Slack once a listing is live
pub fn approval_confirmation(listing_name: &str, actor_name: &str) -> SlackText {
    SlackText::mrkdwn(format!(
        "*{}* has been approved by {}",
        listing_name, actor_name
    ))
}
