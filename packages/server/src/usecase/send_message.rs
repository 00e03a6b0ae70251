//! UseCase: chat message send.
//!
//! Persists the message, then snapshots the room's live set for the
//! fanout. The snapshot is taken after the store write completes, so
//! connections that joined during the write are included and
//! connections that left are not.

use std::sync::Arc;

use crate::domain::{ChatStore, MessageBody, RoomName, StoreError, StoredMessage, Username};
use crate::registry::{ConnectionRegistry, EventSender};

pub struct SendMessageUseCase {
    chat: Arc<dyn ChatStore>,
    registry: ConnectionRegistry,
}

impl SendMessageUseCase {
    pub fn new(chat: Arc<dyn ChatStore>, registry: ConnectionRegistry) -> Self {
        Self { chat, registry }
    }

    /// Persist a message and return it (with the store-assigned id and
    /// timestamp) together with the broadcast targets: every live
    /// connection in the room, the sender included.
    pub async fn execute(
        &self,
        room: &RoomName,
        username: &Username,
        body: &MessageBody,
    ) -> Result<(StoredMessage, Vec<EventSender>), StoreError> {
        let message = self.chat.append_message(room, username, body).await?;
        let targets = self.registry.members(room.as_str()).await;
        Ok((message, targets))
    }
}
