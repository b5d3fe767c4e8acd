use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::domains::moderation::{handle_callback, ModerationOutcome};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

/// `POST /slackadmin/webhook/`: Slack interactivity endpoint.
///
/// Slack sends `application/x-www-form-urlencoded` with the interaction JSON
/// in the `payload` field.
pub async fn slack_webhook_handler(
    Extension(state): Extension<AxumAppState>,
    body: Bytes,
) -> Response {
    let Some(payload) = url::form_urlencoded::parse(&body)
        .find(|(key, _)| key == "payload")
        .map(|(_, value)| value.into_owned())
    else {
        warn!("Slack webhook called without a payload field");
        return StatusCode::BAD_REQUEST.into_response();
    };

    match handle_callback(&payload, &state.server_deps).await {
        ModerationOutcome::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        ModerationOutcome::BadRequest => StatusCode::BAD_REQUEST.into_response(),
        ModerationOutcome::Acknowledged => StatusCode::OK.into_response(),
        ModerationOutcome::Approved(confirmation) => {
            (StatusCode::OK, Json(confirmation)).into_response()
        }
        ModerationOutcome::Failed { reference } => {
            ApiError::ApproveFailed(reference).into_response()
        }
    }
}
