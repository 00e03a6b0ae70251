//! UI layer: HTTP/WebSocket surface over the engine.

pub mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{app, run};
