//! UseCase: room create / join.
//!
//! `createRoom` and `join` share the same core: upsert durable
//! membership, then switch the connection's live room in the registry.
//! `join` additionally loads the full ordered history and yields the
//! other live members so the handler can broadcast a joined notice.

use std::sync::Arc;

use crate::domain::{ChatStore, RoomName, StoreError, StoredMessage, Username};
use crate::registry::{ConnId, ConnectionRegistry, EventSender};

/// What the handler needs to answer a create/join.
pub struct JoinRoomOutcome {
    /// The joining user's refreshed room list.
    pub groups: Vec<String>,
    /// Full ordered history; `None` on a bare `createRoom`.
    pub history: Option<Vec<StoredMessage>>,
    /// Other live members of the room (joined-notice targets); empty
    /// on a bare `createRoom`.
    pub notify: Vec<EventSender>,
}

pub struct JoinRoomUseCase {
    chat: Arc<dyn ChatStore>,
    registry: ConnectionRegistry,
}

impl JoinRoomUseCase {
    pub fn new(chat: Arc<dyn ChatStore>, registry: ConnectionRegistry) -> Self {
        Self { chat, registry }
    }

    /// Execute a create/join for `conn`.
    ///
    /// Durable membership is written first; only then is the live room
    /// switched, so a store failure leaves the registry untouched.
    pub async fn execute(
        &self,
        conn: ConnId,
        room: &RoomName,
        username: &Username,
        with_history: bool,
    ) -> Result<JoinRoomOutcome, StoreError> {
        self.chat.upsert_room_member(room, username).await?;

        let history = if with_history {
            Some(self.chat.history(room).await?)
        } else {
            None
        };
        let groups = self.chat.rooms_for_user(username).await?;

        // Registry last: switch the live room and snapshot the
        // joined-notice targets after the switch.
        if let Some(previous) = self.registry.join(room.as_str(), conn).await {
            tracing::debug!(
                username = %username,
                from = %previous,
                to = %room,
                "connection switched rooms"
            );
        }
        let notify = if with_history {
            self.registry.members_except(room.as_str(), conn).await
        } else {
            Vec::new()
        };

        Ok(JoinRoomOutcome {
            groups,
            history,
            notify,
        })
    }
}
