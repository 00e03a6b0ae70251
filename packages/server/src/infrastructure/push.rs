//! HTTP push sender.
//!
//! POSTs the notification payload to the subscription endpoint and
//! classifies the response: 404/410 means the endpoint is permanently
//! gone, any other failure is transient. Payload encryption (real Web
//! Push aes128gcm) is out of scope; a VAPID-capable client would slot
//! in behind the same [`PushSender`] trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{PushError, PushPayload, PushSender, Subscription};

/// Default per-attempt timeout. A slow push service must not wedge the
/// dispatch task.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Time-to-live advertised to the push service, in seconds.
const PUSH_TTL_SECS: u32 = 60 * 60 * 24;

pub struct HttpPushSender {
    client: reqwest::Client,
}

impl HttpPushSender {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpPushSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushSender for HttpPushSender {
    async fn deliver(
        &self,
        subscription: &Subscription,
        payload: &PushPayload,
    ) -> Result<(), PushError> {
        let response = self
            .client
            .post(&subscription.endpoint)
            .header("TTL", PUSH_TTL_SECS)
            .json(payload)
            .send()
            .await
            .map_err(|e| PushError::Transient(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND | StatusCode::GONE => Err(PushError::Gone),
            status => Err(PushError::Transient(format!(
                "push service returned {status}"
            ))),
        }
    }
}
