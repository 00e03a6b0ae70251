//! UseCase: message deletion.
//!
//! The author-only policy is a runtime flag (config), not a hard rule:
//! when off, any identified connection may delete by id, which is what
//! the browser client historically did.

use std::sync::Arc;

use crate::domain::{ChatStore, StoredMessage};
use crate::registry::{ConnectionRegistry, EventSender};

use super::error::DeleteMessageError;

/// What the handler needs to broadcast a deletion notice.
pub struct DeleteMessageOutcome {
    /// The deleted message (carries the room for targeting).
    pub message: StoredMessage,
    /// Live connections in the message's room.
    pub targets: Vec<EventSender>,
}

pub struct DeleteMessageUseCase {
    chat: Arc<dyn ChatStore>,
    registry: ConnectionRegistry,
    /// When true, only the stored author may delete.
    author_only: bool,
}

impl DeleteMessageUseCase {
    pub fn new(chat: Arc<dyn ChatStore>, registry: ConnectionRegistry, author_only: bool) -> Self {
        Self {
            chat,
            registry,
            author_only,
        }
    }

    /// Delete message `id`. `requester` is the username the client
    /// supplied (or the connection's bound username); it is only
    /// checked under the author-only policy.
    pub async fn execute(
        &self,
        id: &str,
        requester: &str,
    ) -> Result<DeleteMessageOutcome, DeleteMessageError> {
        let Some(message) = self.chat.find_message(id).await? else {
            return Err(DeleteMessageError::NotFound(id.to_string()));
        };

        if self.author_only && message.username.as_str() != requester {
            return Err(DeleteMessageError::NotAuthor {
                id: id.to_string(),
                requester: requester.to_string(),
            });
        }

        let Some(deleted) = self.chat.delete_message(id).await? else {
            // Raced with another delete; treat as not found.
            return Err(DeleteMessageError::NotFound(id.to_string()));
        };

        let targets = self.registry.members(deleted.room.as_str()).await;
        Ok(DeleteMessageOutcome {
            message: deleted,
            targets,
        })
    }
}
