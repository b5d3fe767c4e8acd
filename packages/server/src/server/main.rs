// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use takeout_core::common::utils::{GeocodioClient, SlackWebhookClient};
use takeout_core::domains::locations::PostgresCoordinateCache;
use takeout_core::kernel::ServerDeps;
use takeout_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,takeout_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Open For Takeout API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(app_env = %config.app_env, "Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Outbound clients
    let geocoder = GeocodioClient::new(config.geocodio_api_key.clone(), config.http_timeout)
        .context("Failed to create geocoding client")?;
    let notifier = SlackWebhookClient::new(config.slack_webhook_url.clone(), config.http_timeout)
        .context("Failed to create Slack client")?;

    let server_deps = ServerDeps::new(
        pool.clone(),
        Arc::new(PostgresCoordinateCache::new(pool)),
        Arc::new(geocoder),
        Arc::new(notifier),
        config.moderation.clone(),
        config.is_production(),
    );

    // Build application
    let app = build_app(server_deps, config.allowed_origin.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
