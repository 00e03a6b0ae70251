//! UseCase: room deletion.
//!
//! Mirrors the event order the relay has always used: notify and evict
//! the room's live members first, then delete the durable records,
//! then hand every identified connection its refreshed room list.

use std::sync::Arc;

use crate::domain::{ChatStore, RoomName, Username};
use crate::registry::{ConnectionRegistry, EventSender};

use super::error::DeleteGroupError;

/// What the handler needs to announce a room deletion.
pub struct DeleteGroupOutcome {
    /// Evicted live members (group-deleted notice targets).
    pub evicted: Vec<EventSender>,
    /// Every identified connection paired with its refreshed room
    /// list, queried after the delete.
    pub room_lists: Vec<(EventSender, Vec<String>)>,
}

pub struct DeleteGroupUseCase {
    chat: Arc<dyn ChatStore>,
    registry: ConnectionRegistry,
}

impl DeleteGroupUseCase {
    pub fn new(chat: Arc<dyn ChatStore>, registry: ConnectionRegistry) -> Self {
        Self { chat, registry }
    }

    pub async fn execute(&self, room: &RoomName) -> Result<DeleteGroupOutcome, DeleteGroupError> {
        if self.chat.find_room(room).await?.is_none() {
            return Err(DeleteGroupError::NotFound(room.as_str().to_string()));
        }

        // Evict before deleting so no fanout targets the room while
        // its records disappear.
        let evicted = self.registry.evict_room(room.as_str()).await;

        self.chat.delete_room(room).await?;

        let mut room_lists = Vec::new();
        for (sender, username) in self.registry.identified().await {
            // Bound names were validated at init; one that no longer
            // parses must not fail the whole refresh.
            let Ok(username) = Username::new(username) else {
                continue;
            };
            let groups = self.chat.rooms_for_user(&username).await?;
            room_lists.push((sender, groups));
        }

        Ok(DeleteGroupOutcome {
            evicted,
            room_lists,
        })
    }
}
