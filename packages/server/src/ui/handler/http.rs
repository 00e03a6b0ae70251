//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::{PushKeys, SubscriptionStore, Username};
use crate::infrastructure::dto::http::{SubscribeRequest, SubscribeResponse, VapidKeyResponse};
use crate::ui::state::AppState;

/// `POST /subscribe`: idempotent push-subscription upsert, keyed by
/// endpoint. Re-subscribing resets the `invalid` flag.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Response {
    // Malformed bodies are the client's problem: 400, not 422.
    let Ok(Json(request)) = payload else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Ok(username) = Username::new(request.username) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let endpoint = request.subscription.endpoint;
    if endpoint.is_empty()
        || request.subscription.keys.p256dh.is_empty()
        || request.subscription.keys.auth.is_empty()
    {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let keys = PushKeys {
        p256dh: request.subscription.keys.p256dh,
        auth: request.subscription.keys.auth,
    };
    match state.subscriptions.upsert(&username, &endpoint, keys).await {
        Ok(()) => {
            tracing::info!(username = %username, %endpoint, "subscription upserted");
            (StatusCode::CREATED, Json(SubscribeResponse { ok: true })).into_response()
        }
        Err(e) => {
            tracing::warn!(username = %username, error = %e, "subscription upsert failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /vapidPublicKey`: the key clients use to subscribe.
pub async fn vapid_public_key(State(state): State<Arc<AppState>>) -> Json<VapidKeyResponse> {
    Json(VapidKeyResponse {
        key: state.vapid_public_key.clone(),
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
