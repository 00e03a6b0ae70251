//! UseCase: session initialization (`init`).
//!
//! Binds a username to the connection (first init wins) and loads the
//! user's persisted room list.

use std::sync::Arc;

use crate::domain::{ChatStore, StoreError, Username};
use crate::registry::{ConnId, ConnectionRegistry};

pub struct InitSessionUseCase {
    chat: Arc<dyn ChatStore>,
    registry: ConnectionRegistry,
}

impl InitSessionUseCase {
    pub fn new(chat: Arc<dyn ChatStore>, registry: ConnectionRegistry) -> Self {
        Self { chat, registry }
    }

    /// Bind `username` to `conn` and return the room names the user is
    /// a member of. A repeated `init` does not rebind but still
    /// answers with the room list (reconnecting clients re-init).
    pub async fn execute(
        &self,
        conn: ConnId,
        username: &Username,
    ) -> Result<Vec<String>, StoreError> {
        let bound = self.registry.bind_username(conn, username.as_str()).await;
        if !bound {
            tracing::debug!(username = %username, "init on already-identified connection");
        }
        self.chat.rooms_for_user(username).await
    }
}
