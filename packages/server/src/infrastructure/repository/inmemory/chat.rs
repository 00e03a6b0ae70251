//! In-memory ChatStore implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatStore, MessageBody, Room, RoomName, StoreError, StoredMessage, Timestamp, Username,
};
use roomcast_shared::time::now_unix_millis;

struct ChatState {
    rooms: HashMap<String, Room>,
    /// Append-ordered message log; history queries sort by
    /// (timestamp, insertion order).
    messages: Vec<StoredMessage>,
    /// Last timestamp handed out. Clamps the clock so concurrent
    /// inserts always get non-decreasing timestamps.
    last_timestamp: i64,
}

/// In-memory ChatStore.
pub struct InMemoryChatStore {
    state: Arc<Mutex<ChatState>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ChatState {
                rooms: HashMap::new(),
                messages: Vec::new(),
                last_timestamp: 0,
            })),
        }
    }
}

impl Default for InMemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    fn next_timestamp(&mut self) -> Timestamp {
        let now = now_unix_millis().max(self.last_timestamp);
        self.last_timestamp = now;
        Timestamp::new(now)
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn upsert_room_member(
        &self,
        room: &RoomName,
        username: &Username,
    ) -> Result<Room, StoreError> {
        let mut state = self.state.lock().await;
        let created_at = state.next_timestamp();
        let entry = state
            .rooms
            .entry(room.as_str().to_string())
            .or_insert_with(|| Room::new(room.clone(), created_at));
        entry.add_member(username);
        Ok(entry.clone())
    }

    async fn rooms_for_user(&self, username: &Username) -> Result<Vec<String>, StoreError> {
        let state = self.state.lock().await;
        let mut names: Vec<String> = state
            .rooms
            .values()
            .filter(|room| room.is_member(username.as_str()))
            .map(|room| room.name.as_str().to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn find_room(&self, room: &RoomName) -> Result<Option<Room>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.rooms.get(room.as_str()).cloned())
    }

    async fn append_message(
        &self,
        room: &RoomName,
        username: &Username,
        body: &MessageBody,
    ) -> Result<StoredMessage, StoreError> {
        let mut state = self.state.lock().await;
        let message = StoredMessage {
            id: uuid::Uuid::new_v4().to_string(),
            room: room.clone(),
            username: username.clone(),
            body: body.clone(),
            timestamp: state.next_timestamp(),
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn history(&self, room: &RoomName) -> Result<Vec<StoredMessage>, StoreError> {
        let state = self.state.lock().await;
        let mut messages: Vec<StoredMessage> = state
            .messages
            .iter()
            .filter(|m| m.room == *room)
            .cloned()
            .collect();
        // Insertion order already breaks timestamp ties; stable sort
        // keeps it that way.
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }

    async fn find_message(&self, id: &str) -> Result<Option<StoredMessage>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.messages.iter().find(|m| m.id == id).cloned())
    }

    async fn delete_message(&self, id: &str) -> Result<Option<StoredMessage>, StoreError> {
        let mut state = self.state.lock().await;
        let Some(index) = state.messages.iter().position(|m| m.id == id) else {
            return Ok(None);
        };
        Ok(Some(state.messages.remove(index)))
    }

    async fn delete_room(&self, room: &RoomName) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        if state.rooms.remove(room.as_str()).is_none() {
            return Ok(false);
        }
        state.messages.retain(|m| m.room != *room);
        Ok(true)
    }
}
