//! In-memory store implementations.
//!
//! HashMaps behind a tokio `Mutex` standing in for a document store.
//! Good enough for a single-process relay; a real backend would slot
//! in behind the same domain traits.

pub mod chat;
pub mod subscription;

pub use chat::InMemoryChatStore;
pub use subscription::InMemorySubscriptionStore;
