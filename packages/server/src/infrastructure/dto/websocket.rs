//! WebSocket wire events.
//!
//! Explicit tagged variants per event type: a frame either
//! deserializes into a known shape or is dropped by the handler.
//! Field names follow the browser client's contract (`tempId`,
//! `joinedGroups`, ...).

use serde::{Deserialize, Serialize};

use crate::domain::StoredMessage;

/// Client → server events.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Bind a username to this connection.
    Init { username: String },
    /// Create (or join) a room without fetching history.
    CreateRoom { room: String },
    /// Join a room and fetch its history.
    Join { room: String },
    /// Send a chat message. `temp_id` is an optional client-side
    /// correlation id echoed back on the resulting `chat` event.
    Message {
        room: String,
        msg: String,
        #[serde(rename = "tempId", default)]
        temp_id: Option<String>,
    },
    /// Delete a message by id. `username` is only consulted when the
    /// author-only delete policy is enabled.
    #[serde(alias = "deleteMessage")]
    Delete {
        id: String,
        #[serde(default)]
        username: Option<String>,
    },
    /// Delete a room and everything in it.
    DeleteGroup { room: String },
}

/// One message as rendered on the wire (history entries and `chat`
/// events share this shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub id: String,
    pub username: String,
    pub message: String,
    /// Unix milliseconds
    pub timestamp: i64,
}

impl From<&StoredMessage> for WireMessage {
    fn from(message: &StoredMessage) -> Self {
        Self {
            id: message.id.clone(),
            username: message.username.as_str().to_string(),
            message: message.body.as_str().to_string(),
            timestamp: message.timestamp.value(),
        }
    }
}

/// Server → client events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// The requesting user's persisted room list.
    JoinedGroups { groups: Vec<String> },
    /// Full ordered history of the room just joined.
    History { messages: Vec<WireMessage> },
    /// A newly persisted chat message, fanned out to the room.
    Chat {
        id: String,
        username: String,
        message: String,
        timestamp: i64,
        #[serde(rename = "tempId", skip_serializing_if = "Option::is_none")]
        temp_id: Option<String>,
    },
    /// A message was deleted.
    MessageDeleted { id: String },
    /// Human-readable room notice (joined / left / group deleted).
    System { message: String },
}

impl ServerEvent {
    /// Build a `chat` event from a persisted message, echoing the
    /// sender's correlation id.
    pub fn chat(message: &StoredMessage, temp_id: Option<String>) -> Self {
        Self::Chat {
            id: message.id.clone(),
            username: message.username.as_str().to_string(),
            message: message.body.as_str().to_string(),
            timestamp: message.timestamp.value(),
            temp_id,
        }
    }

    /// Serialize to the JSON text frame sent down the socket.
    pub fn to_json(&self) -> String {
        // ServerEvent contains only strings/ints; serialization cannot
        // fail in practice.
        serde_json::to_string(self).unwrap_or_default()
    }
}
