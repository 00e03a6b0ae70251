//! Push delivery seam.
//!
//! The dispatcher only needs "attempt one delivery, tell me whether
//! the endpoint is gone"; everything HTTP-shaped lives behind this
//! trait in `infrastructure::push`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::Subscription;

/// Notification payload handed to the browser push agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PushPayload {
    /// Payload for a new chat message from `sender`.
    pub fn for_chat_message(sender: &str, text: &str) -> Self {
        Self {
            title: format!("New message from {sender}"),
            body: text.to_string(),
            icon: "/icon.png".to_string(),
            url: Some("/".to_string()),
        }
    }
}

/// Push delivery failure classification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PushError {
    /// The endpoint is permanently gone (HTTP 404/410-equivalent);
    /// the subscription must be invalidated.
    #[error("push endpoint gone")]
    Gone,

    /// Anything else (rate limit, server error, connectivity); the
    /// subscription stays valid and the next message retries
    /// naturally.
    #[error("transient push failure: {0}")]
    Transient(String),
}

/// A single best-effort delivery attempt to one subscription.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn deliver(
        &self,
        subscription: &Subscription,
        payload: &PushPayload,
    ) -> Result<(), PushError>;
}
