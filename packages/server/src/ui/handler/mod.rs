//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

pub use http::{health_check, subscribe, vapid_public_key};
pub use websocket::websocket_handler;
