//! Core domain models for the chat relay.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::value_object::{MessageBody, RoomName, Timestamp, Username};

/// A named chat room with its persisted member set.
///
/// Membership is set-union only: a username is a member iff that user
/// has ever joined or created the room. Members are never removed
/// automatically, including on disconnect; live reachability is the
/// Connection Registry's concern, not the room's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room name
    pub name: RoomName,
    /// Usernames of everyone who ever joined (sorted, no duplicates)
    pub members: BTreeSet<String>,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new empty room.
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            name,
            members: BTreeSet::new(),
            created_at,
        }
    }

    /// Add a member by username. Returns true if the member was new.
    pub fn add_member(&mut self, username: &Username) -> bool {
        self.members.insert(username.as_str().to_string())
    }

    /// Whether the given username is a member.
    pub fn is_member(&self, username: &str) -> bool {
        self.members.contains(username)
    }
}

/// A persisted chat message.
///
/// Immutable once created except for deletion. The id and timestamp
/// are assigned by the store at insert time. The room is referenced by
/// name, so a message record stays self-describing even if the room is
/// deleted out from under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Store-assigned unique id
    pub id: String,
    /// Name of the room this message belongs to
    pub room: RoomName,
    /// Author username
    pub username: Username,
    /// Message text
    pub body: MessageBody,
    /// Store-assigned creation timestamp
    pub timestamp: Timestamp,
}

/// Delivery keys carried by a push subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushKeys {
    pub p256dh: String,
    pub auth: String,
}

/// A browser push subscription, keyed by its endpoint.
///
/// `invalid` starts false and flips true after a permanent delivery
/// failure; the transition is one-way until the client re-subscribes
/// with the same endpoint, which upserts and resets the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Owning username
    pub username: Username,
    /// Push service endpoint URL (unique key)
    pub endpoint: String,
    /// Delivery keys
    pub keys: PushKeys,
    /// Whether the endpoint has permanently rejected delivery
    pub invalid: bool,
}
