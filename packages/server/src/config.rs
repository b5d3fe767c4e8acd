use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub geocodio_api_key: String,
    pub slack_webhook_url: String,
    pub moderation: ModerationConfig,
    /// CORS origin; `None` allows any origin
    pub allowed_origin: Option<String>,
    pub app_env: String,
    pub http_timeout: Duration,
}

/// Expected origin of Slack interaction callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationConfig {
    pub team_id: String,
    pub channel_id: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            geocodio_api_key: env::var("GEOCODIO_APIKEY")
                .context("GEOCODIO_APIKEY must be set")?,
            slack_webhook_url: env::var("SLACK_WEBHOOK_URL")
                .context("SLACK_WEBHOOK_URL must be set")?,
            moderation: ModerationConfig {
                team_id: env::var("SLACK_TEAM_ID").context("SLACK_TEAM_ID must be set")?,
                channel_id: env::var("SLACK_CHANNEL_ID")
                    .context("SLACK_CHANNEL_ID must be set")?,
            },
            allowed_origin: env::var("ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.is_empty() && origin != "*"),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            http_timeout: Duration::from_secs(
                env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("HTTP_TIMEOUT_SECS must be a valid number")?,
            ),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
