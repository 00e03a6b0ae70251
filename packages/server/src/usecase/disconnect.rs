//! UseCase: transport close.
//!
//! Pure registry work: remove the connection from whichever room it
//! occupied and collect the remaining live members for the "left"
//! notice. Durable membership is deliberately untouched; the user
//! stays a room member so history and push notifications keep
//! targeting them.

use crate::registry::{ConnId, ConnectionRegistry, EventSender};

/// Emitted when a connection that was identified and in a room closes.
pub struct DisconnectOutcome {
    pub room: String,
    pub username: String,
    /// The room's remaining live members.
    pub remaining: Vec<EventSender>,
}

pub struct DisconnectUseCase {
    registry: ConnectionRegistry,
}

impl DisconnectUseCase {
    pub fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }

    /// Remove `conn` from the registry. Returns `Some` only when the
    /// connection had both a room and a username; an anonymous or
    /// roomless connection closes without a notice.
    pub async fn execute(&self, conn: ConnId) -> Option<DisconnectOutcome> {
        let (room, username) = self.registry.disconnect(conn).await;
        let (room, username) = (room?, username?);
        let remaining = self.registry.members(&room).await;
        Some(DisconnectOutcome {
            room,
            username,
            remaining,
        })
    }
}
