//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

/// `POST /subscribe` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub username: String,
    pub subscription: SubscriptionDto,
}

/// Browser `PushSubscription.toJSON()` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionDto {
    pub endpoint: String,
    pub keys: PushKeysDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushKeysDto {
    pub p256dh: String,
    pub auth: String,
}

/// `POST /subscribe` success response.
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeResponse {
    pub ok: bool,
}

/// `GET /vapidPublicKey` response.
#[derive(Debug, Clone, Serialize)]
pub struct VapidKeyResponse {
    pub key: String,
}
