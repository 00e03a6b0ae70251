//! Integration test fixtures: a real server on an ephemeral port plus
//! handles into its stores and a recording push sender.

#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use roomcast_server::domain::{PushError, PushPayload, PushSender, Subscription};
use roomcast_server::infrastructure::repository::{InMemoryChatStore, InMemorySubscriptionStore};
use roomcast_server::ui::state::AppState;

/// Push sender that records attempts instead of doing HTTP. Endpoints
/// registered via [`Self::mark_gone`] answer with a permanent failure.
pub struct RecordingPushSender {
    gone: Mutex<HashSet<String>>,
    attempts: Mutex<Vec<String>>,
}

impl RecordingPushSender {
    pub fn new() -> Self {
        Self {
            gone: Mutex::new(HashSet::new()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub async fn mark_gone(&self, endpoint: &str) {
        self.gone.lock().await.insert(endpoint.to_string());
    }

    /// Endpoints attempted so far, in attempt order.
    pub async fn attempts(&self) -> Vec<String> {
        self.attempts.lock().await.clone()
    }

    /// Poll until at least `count` attempts were made (dispatch runs in
    /// a background task) or a couple of seconds pass.
    pub async fn wait_for_attempts(&self, count: usize) -> Vec<String> {
        for _ in 0..200 {
            let attempts = self.attempts().await;
            if attempts.len() >= count {
                return attempts;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.attempts().await
    }
}

#[async_trait]
impl PushSender for RecordingPushSender {
    async fn deliver(
        &self,
        subscription: &Subscription,
        _payload: &PushPayload,
    ) -> Result<(), PushError> {
        self.attempts.lock().await.push(subscription.endpoint.clone());
        if self.gone.lock().await.contains(&subscription.endpoint) {
            Err(PushError::Gone)
        } else {
            Ok(())
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub chat: Arc<InMemoryChatStore>,
    pub subscriptions: Arc<InMemorySubscriptionStore>,
    pub push: Arc<RecordingPushSender>,
}

impl TestServer {
    /// Bind an ephemeral port and serve the full router on it.
    pub async fn start() -> Self {
        let chat = Arc::new(InMemoryChatStore::new());
        let subscriptions = Arc::new(InMemorySubscriptionStore::new());
        let push = Arc::new(RecordingPushSender::new());

        let state = Arc::new(AppState::new(
            chat.clone(),
            subscriptions.clone(),
            push.clone(),
            false,
            "test-vapid-key".to_string(),
        ));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no local addr");

        tokio::spawn(async move {
            let _ = axum::serve(listener, roomcast_server::app(state)).await;
        });

        Self {
            addr,
            chat,
            subscriptions,
            push,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Open a WebSocket connection to the test server.
pub async fn ws_connect(server: &TestServer) -> WsClient {
    let (client, _response) = connect_async(server.ws_url())
        .await
        .expect("websocket connect failed");
    client
}

/// Send one client event as a JSON text frame.
pub async fn send_json(client: &mut WsClient, event: serde_json::Value) {
    client
        .send(Message::Text(event.to_string().into()))
        .await
        .expect("websocket send failed");
}

/// Receive the next JSON text frame, with a timeout.
pub async fn recv_json(client: &mut WsClient) -> serde_json::Value {
    let deadline = Duration::from_secs(5);
    loop {
        let frame = tokio::time::timeout(deadline, client.next())
            .await
            .expect("timed out waiting for server event")
            .expect("connection closed while waiting for server event")
            .expect("websocket error while waiting for server event");
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).expect("server sent invalid JSON");
        }
    }
}

/// Assert that no event arrives within a short window.
pub async fn expect_silence(client: &mut WsClient) {
    let result = tokio::time::timeout(Duration::from_millis(300), client.next()).await;
    assert!(
        result.is_err(),
        "expected no event, got {:?}",
        result.unwrap()
    );
}
