use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::kernel::BaseNotifier;

// =============================================================================
// Block Kit message types
// =============================================================================

/// Slack text object (`mrkdwn` or `plain_text`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackText {
    #[serde(rename = "type", default = "default_text_type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

fn default_text_type() -> String {
    "plain_text".to_string()
}

impl SlackText {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: "mrkdwn".to_string(),
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: "plain_text".to_string(),
            text: text.into(),
        }
    }
}

/// Interactive button element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackButton {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub style: &'static str,
    pub action_id: String,
    pub value: String,
    pub text: SlackText,
}

impl SlackButton {
    pub fn primary(action_id: impl Into<String>, label: &str, value: impl Into<String>) -> Self {
        Self {
            kind: "button",
            style: "primary",
            action_id: action_id.into(),
            value: value.into(),
            text: SlackText::plain(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackBlock {
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<SlackText>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<SlackText>>,
    },
    Divider,
    Actions {
        elements: Vec<SlackButton>,
    },
}

/// Incoming-webhook message body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlackMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<SlackBlock>,
}

impl SlackMessage {
    /// Plain message without blocks
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            blocks: Vec::new(),
        }
    }
}

/// Host Slack issues interaction `response_url`s on
const SLACK_HOOKS_HOST: &str = "hooks.slack.com";

/// Whether `url` is a Slack-issued interaction reply URL. Anything else came
/// from the callback body and must not be posted to.
pub fn is_slack_response_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|url| url.scheme() == "https" && url.host_str() == Some(SLACK_HOOKS_HOST))
        .unwrap_or(false)
}

// =============================================================================
// Webhook client
// =============================================================================

/// Slack incoming-webhook client.
/// Posts moderation requests to the admin channel and replies to interaction
/// `response_url`s.
pub struct SlackWebhookClient {
    client: Client,
    webhook_url: String,
}

impl SlackWebhookClient {
    pub fn new(webhook_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<()> {
        let response = self.client.post(url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Slack post failed {}: {}", status, body);
            anyhow::bail!("Slack API error {}: {}", status, body);
        }

        Ok(())
    }
}

#[async_trait]
impl BaseNotifier for SlackWebhookClient {
    async fn notify(&self, message: &SlackMessage) -> Result<()> {
        info!(blocks = message.blocks.len(), "Posting Slack moderation message");
        self.post_json(&self.webhook_url, message).await
    }

    async fn respond(&self, response_url: &str, reply: &SlackText) -> Result<()> {
        info!("Posting Slack interaction reply");
        self.post_json(response_url, reply).await
    }
}
