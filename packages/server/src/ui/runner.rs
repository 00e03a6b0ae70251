//! Router assembly and server loop.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::infrastructure::push::HttpPushSender;
use crate::infrastructure::repository::{InMemoryChatStore, InMemorySubscriptionStore};
use crate::ui::handler::{health_check, subscribe, vapid_public_key, websocket_handler};
use crate::ui::state::AppState;

use super::signal;

/// Build the router over an existing state (integration tests wire
/// their own stores and push sender through this).
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/subscribe", post(subscribe))
        .route("/vapidPublicKey", get(vapid_public_key))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the relay until ctrl-c / SIGTERM.
///
/// The only fatal error is failing to bind the listener; everything
/// after that is handled per-connection.
pub async fn run(config: Config) -> Result<(), std::io::Error> {
    let state = Arc::new(AppState::new(
        Arc::new(InMemoryChatStore::new()),
        Arc::new(InMemorySubscriptionStore::new()),
        Arc::new(HttpPushSender::new()),
        config.author_only_deletes,
        config.vapid_public_key.clone(),
    ));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "roomcast server listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(signal::shutdown_signal())
        .await
}
