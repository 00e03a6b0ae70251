//! In-memory SubscriptionStore implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PushKeys, StoreError, Subscription, SubscriptionStore, Username};

/// In-memory SubscriptionStore, keyed by endpoint.
pub struct InMemorySubscriptionStore {
    /// endpoint -> subscription record
    subscriptions: Arc<Mutex<HashMap<String, Subscription>>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self {
            subscriptions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn upsert(
        &self,
        username: &Username,
        endpoint: &str,
        keys: PushKeys,
    ) -> Result<(), StoreError> {
        let mut subscriptions = self.subscriptions.lock().await;
        subscriptions.insert(
            endpoint.to_string(),
            Subscription {
                username: username.clone(),
                endpoint: endpoint.to_string(),
                keys,
                invalid: false,
            },
        );
        Ok(())
    }

    async fn valid_for_user(&self, username: &str) -> Result<Vec<Subscription>, StoreError> {
        let subscriptions = self.subscriptions.lock().await;
        Ok(subscriptions
            .values()
            .filter(|s| !s.invalid && s.username.as_str() == username)
            .cloned()
            .collect())
    }

    async fn mark_invalid(&self, endpoint: &str) -> Result<(), StoreError> {
        let mut subscriptions = self.subscriptions.lock().await;
        if let Some(subscription) = subscriptions.get_mut(endpoint) {
            subscription.invalid = true;
        }
        Ok(())
    }
}
