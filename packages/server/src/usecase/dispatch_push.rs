//! UseCase: best-effort push dispatch.
//!
//! Runs as a detached background task per message-send: its
//! completions only ever touch the Subscription Store, never the
//! sending connection's response path. Delivery attempts for
//! different subscriptions run concurrently so one slow endpoint
//! cannot serialize the rest.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{
    ChatStore, PushError, PushPayload, PushSender, RoomName, StoreError, Subscription,
    SubscriptionStore,
};

pub struct DispatchPushUseCase {
    chat: Arc<dyn ChatStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
    sender: Arc<dyn PushSender>,
}

impl DispatchPushUseCase {
    pub fn new(
        chat: Arc<dyn ChatStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        sender: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            chat,
            subscriptions,
            sender,
        }
    }

    /// Deliver a notification for a message in `room` sent by
    /// `sender_username` to every other persisted room member's valid
    /// subscriptions. Permanent failures invalidate the individual
    /// subscription; transient failures are logged and left alone.
    pub async fn execute(
        &self,
        room: &RoomName,
        sender_username: &str,
        text: &str,
    ) -> Result<(), StoreError> {
        let Some(stored_room) = self.chat.find_room(room).await? else {
            // Room deleted between the send and the dispatch task
            // running; nothing to notify.
            return Ok(());
        };

        let mut targets: Vec<Subscription> = Vec::new();
        for member in stored_room.members.iter().filter(|m| *m != sender_username) {
            targets.extend(self.subscriptions.valid_for_user(member).await?);
        }
        if targets.is_empty() {
            return Ok(());
        }

        let payload = PushPayload::for_chat_message(sender_username, text);
        let attempts = targets
            .iter()
            .map(|subscription| self.attempt(subscription, &payload));
        join_all(attempts).await;
        Ok(())
    }

    async fn attempt(&self, subscription: &Subscription, payload: &PushPayload) {
        match self.sender.deliver(subscription, payload).await {
            Ok(()) => {
                tracing::debug!(
                    username = %subscription.username,
                    endpoint = %subscription.endpoint,
                    "push delivered"
                );
            }
            Err(PushError::Gone) => {
                tracing::info!(
                    username = %subscription.username,
                    endpoint = %subscription.endpoint,
                    "push endpoint gone, invalidating subscription"
                );
                if let Err(e) = self.subscriptions.mark_invalid(&subscription.endpoint).await {
                    tracing::warn!(endpoint = %subscription.endpoint, error = %e, "failed to invalidate subscription");
                }
            }
            Err(PushError::Transient(reason)) => {
                tracing::warn!(
                    username = %subscription.username,
                    endpoint = %subscription.endpoint,
                    %reason,
                    "transient push failure, will retry on next message"
                );
            }
        }
    }
}
