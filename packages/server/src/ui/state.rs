//! Shared application state.

use std::sync::Arc;

use crate::domain::{ChatStore, PushSender, SubscriptionStore};
use crate::registry::ConnectionRegistry;

/// State shared by every handler. Store and push implementations are
/// trait objects so tests can swap them out.
pub struct AppState {
    pub registry: ConnectionRegistry,
    pub chat: Arc<dyn ChatStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub push: Arc<dyn PushSender>,
    /// When true, only a message's author may delete it.
    pub author_only_deletes: bool,
    /// VAPID public key handed to subscribing clients (may be empty).
    pub vapid_public_key: String,
}

impl AppState {
    pub fn new(
        chat: Arc<dyn ChatStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        push: Arc<dyn PushSender>,
        author_only_deletes: bool,
        vapid_public_key: String,
    ) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            chat,
            subscriptions,
            push,
            author_only_deletes,
            vapid_public_key,
        }
    }
}
