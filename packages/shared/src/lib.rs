//! Shared utilities for roomcast.
//!
//! Currently: tracing setup and wall-clock helpers used by both the
//! server and its integration tests.

pub mod logger;
pub mod time;
