//! Inbound Identity Provider webhook endpoint.
//!
//! Signature verification runs against the raw body before anything is
//! parsed; an unverifiable delivery is rejected with 401 and no state
//! change.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};

use crate::error::ApiError;
use crate::state::AppState;
use aulario_core::AularioError;
use aulario_identity::webhook::{verify_signature, SignatureHeaders, WebhookEvent};
use aulario_identity::SignatureError;
use aulario_sync::WebhookOutcome;

pub fn webhooks_router() -> Router<AppState> {
    Router::new().route("/identity", post(receive_identity_event))
}

async fn receive_identity_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookOutcome>, ApiError> {
    let signature = signature_headers(&headers)?;
    verify_signature(&state.webhook_secret, &signature, &body)?;

    let event: WebhookEvent = serde_json::from_slice(&body).map_err(|e| {
        AularioError::validation("body", format!("unparseable webhook payload: {e}"))
    })?;

    tracing::info!(event_type = %event.event_type, identity_id = %event.data.id, "Webhook received");
    let outcome = state.sync.handle_webhook_event(&event).await?;
    Ok(Json(outcome))
}

fn signature_headers(headers: &HeaderMap) -> Result<SignatureHeaders, SignatureError> {
    let get = |name: &'static str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(SignatureError::MissingHeader(name))
    };
    Ok(SignatureHeaders {
        id: get("svix-id")?,
        timestamp: get("svix-timestamp")?,
        signature: get("svix-signature")?,
    })
}
