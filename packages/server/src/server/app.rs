//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    create_restaurant, get_restaurant, health_handler, list_restaurants, root_handler,
    slack_webhook_handler,
};

/// Per-request ceiling, including outbound geocoder and Slack calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// `allowed_origin` of `None` allows any origin.
pub fn build_app(server_deps: ServerDeps, allowed_origin: Option<String>) -> Router {
    let app_state = AxumAppState {
        server_deps: Arc::new(server_deps),
    };

    let origin = match allowed_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
    {
        Ok(Some(origin)) => AllowOrigin::exact(origin),
        Ok(None) => AllowOrigin::any(),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid ALLOWED_ORIGIN, allowing any origin");
            AllowOrigin::any()
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            "/restaurants/",
            get(list_restaurants).post(create_restaurant),
        )
        .route("/restaurants/:id", get(get_restaurant))
        .route("/slackadmin/webhook/", post(slack_webhook_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
