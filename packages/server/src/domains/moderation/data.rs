//! Slack interaction callback payload.
//!
//! Only the fields the gateway reads are decoded. Everything is optional on
//! the wire, so a payload from the wrong workspace still decodes and is then
//! rejected by the team/channel check instead of failing as malformed.

use serde::Deserialize;

use crate::common::utils::SlackText;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InteractionPayload {
    pub team: SlackTeam,
    pub user: SlackUser,
    pub channel: SlackChannel,
    pub response_url: String,
    pub actions: Vec<InteractionAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SlackTeam {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SlackUser {
    pub username: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SlackChannel {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionAction {
    #[serde(default)]
    pub value: String,
    #[serde(default = "empty_label")]
    pub text: SlackText,
}

fn empty_label() -> SlackText {
    SlackText::plain("")
}

impl InteractionPayload {
    /// Display name of the moderator who clicked
    pub fn actor_name(&self) -> &str {
        if self.user.name.is_empty() {
            &self.user.username
        } else {
            &self.user.name
        }
    }

    /// The button that was clicked
    pub fn first_action(&self) -> Option<&InteractionAction> {
        self.actions.first()
    }
}
