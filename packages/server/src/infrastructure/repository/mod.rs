//! Store implementations.
//!
//! The usecase layer depends on the domain traits only; these are the
//! concrete backends wired up in the binary (and reused directly by
//! tests).

pub mod inmemory;

pub use inmemory::{InMemoryChatStore, InMemorySubscriptionStore};
