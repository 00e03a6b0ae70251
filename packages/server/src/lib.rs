//! Room-based chat relay: presence tracking, live fanout and
//! best-effort push notification dispatch.
//!
//! Layering, outermost first: `ui` (axum handlers and the server
//! loop), `usecase` (one business operation per inbound event),
//! `domain` (entities, value objects, and the store/push trait
//! seams), `infrastructure` (in-memory stores, wire DTOs, the HTTP
//! push sender). The `registry` module is the in-memory map of live
//! connections that fanout targets are computed from.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod registry;
pub mod ui;
pub mod usecase;

pub use config::Config;
pub use ui::{app, run};
