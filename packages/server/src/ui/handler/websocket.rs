//! WebSocket connection handler.
//!
//! One connection = one recv loop + one outbound forwarder task over
//! an unbounded channel. Events for the same connection are handled
//! sequentially in arrival order inside the recv loop; different
//! connections run concurrently. Sends to a closed peer fail silently
//! (the forwarder has already exited), so an in-flight handler never
//! errors on a vanished transport.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::domain::{MessageBody, RoomName, Username};
use crate::infrastructure::dto::websocket::{ClientEvent, ServerEvent, WireMessage};
use crate::registry::{ConnId, EventSender};
use crate::ui::state::AppState;
use crate::usecase::{
    DeleteGroupError, DeleteGroupUseCase, DeleteMessageError, DeleteMessageUseCase,
    DisconnectUseCase, DispatchPushUseCase, InitSessionUseCase, JoinRoomUseCase,
    SendMessageUseCase,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sink, mut stream) = socket.split();

    // Channel other connections use to reach this one; registered in
    // the Connection Registry for the lifetime of the socket.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let conn = state.registry.register(tx.clone()).await;
    tracing::info!(conn = ?conn, "connection opened");

    // Forward fanout events down the socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if sink.send(Message::Text(event.into())).await.is_err() {
                break;
            }
        }
    });

    // Handle inbound events sequentially, in arrival order.
    let recv_state = state.clone();
    let reply = tx;
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = stream.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::debug!(conn = ?conn, error = %e, "websocket error");
                    break;
                }
            };
            match frame {
                Message::Text(text) => {
                    handle_event(&recv_state, conn, &reply, &text).await;
                }
                Message::Close(_) => break,
                // Ping/pong is handled by the protocol layer.
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let disconnect = DisconnectUseCase::new(state.registry.clone());
    if let Some(outcome) = disconnect.execute(conn).await {
        let notice = ServerEvent::System {
            message: format!("{} left the chat", outcome.username),
        }
        .to_json();
        for member in outcome.remaining {
            let _ = member.send(notice.clone());
        }
        tracing::info!(username = %outcome.username, room = %outcome.room, "connection left room");
    }
    tracing::info!(conn = ?conn, "connection closed");
}

/// Dispatch one inbound frame. Validation failures drop the event
/// silently; store failures abort it with a warning. Neither closes
/// the connection.
async fn handle_event(state: &Arc<AppState>, conn: ConnId, reply: &EventSender, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(conn = ?conn, error = %e, "dropping malformed frame");
            return;
        }
    };

    match event {
        ClientEvent::Init { username } => handle_init(state, conn, reply, username).await,
        ClientEvent::CreateRoom { room } => {
            handle_join(state, conn, reply, room, false).await;
        }
        ClientEvent::Join { room } => {
            handle_join(state, conn, reply, room, true).await;
        }
        ClientEvent::Message { room, msg, temp_id } => {
            handle_message(state, conn, room, msg, temp_id).await;
        }
        ClientEvent::Delete { id, username } => {
            handle_delete(state, conn, id, username).await;
        }
        ClientEvent::DeleteGroup { room } => {
            handle_delete_group(state, room).await;
        }
    }
}

async fn handle_init(state: &Arc<AppState>, conn: ConnId, reply: &EventSender, username: String) {
    let Ok(username) = Username::new(username) else {
        tracing::debug!(conn = ?conn, "init with invalid username, dropping");
        return;
    };

    let usecase = InitSessionUseCase::new(state.chat.clone(), state.registry.clone());
    match usecase.execute(conn, &username).await {
        Ok(groups) => {
            let _ = reply.send(ServerEvent::JoinedGroups { groups }.to_json());
            tracing::info!(username = %username, "session initialized");
        }
        Err(e) => tracing::warn!(username = %username, error = %e, "init failed"),
    }
}

async fn handle_join(
    state: &Arc<AppState>,
    conn: ConnId,
    reply: &EventSender,
    room: String,
    with_history: bool,
) {
    let Ok(room) = RoomName::new(&room) else {
        tracing::debug!(conn = ?conn, "join with empty room name, dropping");
        return;
    };
    let Some(username) = state.registry.username(conn).await else {
        tracing::debug!(conn = ?conn, room = %room, "join before init, dropping");
        return;
    };
    let Ok(username) = Username::new(username) else {
        return;
    };

    let usecase = JoinRoomUseCase::new(state.chat.clone(), state.registry.clone());
    match usecase.execute(conn, &room, &username, with_history).await {
        Ok(outcome) => {
            if let Some(history) = outcome.history {
                let messages: Vec<WireMessage> = history.iter().map(WireMessage::from).collect();
                let _ = reply.send(ServerEvent::History { messages }.to_json());

                let notice = ServerEvent::System {
                    message: format!("{username} joined the chat"),
                }
                .to_json();
                for member in outcome.notify {
                    let _ = member.send(notice.clone());
                }
            }
            let _ = reply.send(
                ServerEvent::JoinedGroups {
                    groups: outcome.groups,
                }
                .to_json(),
            );
            tracing::info!(username = %username, room = %room, with_history, "joined room");
        }
        Err(e) => tracing::warn!(username = %username, room = %room, error = %e, "join failed"),
    }
}

async fn handle_message(
    state: &Arc<AppState>,
    conn: ConnId,
    room: String,
    msg: String,
    temp_id: Option<String>,
) {
    let Some(username) = state.registry.username(conn).await else {
        tracing::debug!(conn = ?conn, "message before init, dropping");
        return;
    };
    let (Ok(room), Ok(username), Ok(body)) = (
        RoomName::new(&room),
        Username::new(username),
        MessageBody::new(msg),
    ) else {
        tracing::debug!(conn = ?conn, "message with empty room or body, dropping");
        return;
    };

    let usecase = SendMessageUseCase::new(state.chat.clone(), state.registry.clone());
    let (message, targets) = match usecase.execute(&room, &username, &body).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(username = %username, room = %room, error = %e, "message send failed");
            return;
        }
    };

    let event = ServerEvent::chat(&message, temp_id).to_json();
    for target in targets {
        let _ = target.send(event.clone());
    }

    // Offline members get a best-effort push; its outcome never
    // affects this connection.
    let dispatch = DispatchPushUseCase::new(
        state.chat.clone(),
        state.subscriptions.clone(),
        state.push.clone(),
    );
    tokio::spawn(async move {
        if let Err(e) = dispatch
            .execute(&message.room, message.username.as_str(), message.body.as_str())
            .await
        {
            tracing::warn!(room = %message.room, error = %e, "push dispatch failed");
        }
    });
}

async fn handle_delete(
    state: &Arc<AppState>,
    conn: ConnId,
    id: String,
    username: Option<String>,
) {
    // `deleteMessage` carries the requester explicitly; bare `delete`
    // falls back to the connection's bound username.
    let requester = match username {
        Some(name) => name,
        None => state.registry.username(conn).await.unwrap_or_default(),
    };

    let usecase = DeleteMessageUseCase::new(
        state.chat.clone(),
        state.registry.clone(),
        state.author_only_deletes,
    );
    match usecase.execute(&id, &requester).await {
        Ok(outcome) => {
            let event = ServerEvent::MessageDeleted {
                id: outcome.message.id.clone(),
            }
            .to_json();
            for target in outcome.targets {
                let _ = target.send(event.clone());
            }
            tracing::info!(id = %outcome.message.id, room = %outcome.message.room, "message deleted");
        }
        Err(e @ (DeleteMessageError::NotFound(_) | DeleteMessageError::NotAuthor { .. })) => {
            tracing::debug!(%id, %requester, error = %e, "delete dropped");
        }
        Err(DeleteMessageError::Store(e)) => {
            tracing::warn!(%id, error = %e, "delete failed");
        }
    }
}

async fn handle_delete_group(state: &Arc<AppState>, room: String) {
    let Ok(room) = RoomName::new(&room) else {
        tracing::debug!("deleteGroup with empty room name, dropping");
        return;
    };

    let usecase = DeleteGroupUseCase::new(state.chat.clone(), state.registry.clone());
    match usecase.execute(&room).await {
        Ok(outcome) => {
            let notice = ServerEvent::System {
                message: format!("Group \"{room}\" has been deleted."),
            }
            .to_json();
            for member in outcome.evicted {
                let _ = member.send(notice.clone());
            }
            for (sender, groups) in outcome.room_lists {
                let _ = sender.send(ServerEvent::JoinedGroups { groups }.to_json());
            }
            tracing::info!(room = %room, "group deleted");
        }
        Err(e @ DeleteGroupError::NotFound(_)) => {
            tracing::debug!(room = %room, error = %e, "deleteGroup dropped");
        }
        Err(DeleteGroupError::Store(e)) => {
            tracing::warn!(room = %room, error = %e, "deleteGroup failed");
        }
    }
}
