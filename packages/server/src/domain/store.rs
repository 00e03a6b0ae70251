//! Durable store traits.
//!
//! The usecase layer depends on these traits only; the in-memory
//! implementations live in `infrastructure::repository`. Every
//! operation may suspend on I/O,
//! so callers must not hold the Connection Registry's lock across a
//! store call.

use async_trait::async_trait;

use super::entity::{PushKeys, Room, StoredMessage, Subscription};
use super::error::StoreError;
use super::value_object::{MessageBody, RoomName, Username};

/// Persistence for rooms and their message history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Create the room if absent and add `username` to its member set
    /// (set union; adding an existing member is a no-op). Returns the
    /// resulting room.
    async fn upsert_room_member(
        &self,
        room: &RoomName,
        username: &Username,
    ) -> Result<Room, StoreError>;

    /// Names of every room whose member set contains `username`.
    async fn rooms_for_user(&self, username: &Username) -> Result<Vec<String>, StoreError>;

    /// Look up a room by name.
    async fn find_room(&self, room: &RoomName) -> Result<Option<Room>, StoreError>;

    /// Persist a new message. The store assigns the id and the
    /// creation timestamp; timestamps are non-decreasing across
    /// concurrent inserts.
    async fn append_message(
        &self,
        room: &RoomName,
        username: &Username,
        body: &MessageBody,
    ) -> Result<StoredMessage, StoreError>;

    /// Full message history for a room, ascending by creation time.
    async fn history(&self, room: &RoomName) -> Result<Vec<StoredMessage>, StoreError>;

    /// Look up a single message by id.
    async fn find_message(&self, id: &str) -> Result<Option<StoredMessage>, StoreError>;

    /// Delete a message by id, returning the deleted record if it
    /// existed.
    async fn delete_message(&self, id: &str) -> Result<Option<StoredMessage>, StoreError>;

    /// Delete a room and cascade-delete its messages. Returns false if
    /// the room did not exist.
    async fn delete_room(&self, room: &RoomName) -> Result<bool, StoreError>;
}

/// Persistence for push subscriptions, keyed by endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Insert or update the subscription for `endpoint`. Re-subscribing
    /// overwrites the username and keys and resets `invalid` to false.
    async fn upsert(
        &self,
        username: &Username,
        endpoint: &str,
        keys: PushKeys,
    ) -> Result<(), StoreError>;

    /// All non-invalid subscriptions belonging to `username`.
    async fn valid_for_user(&self, username: &str) -> Result<Vec<Subscription>, StoreError>;

    /// Mark the subscription for `endpoint` invalid. One-way; unknown
    /// endpoints are a no-op.
    async fn mark_invalid(&self, endpoint: &str) -> Result<(), StoreError>;
}
