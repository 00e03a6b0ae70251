//! Domain layer for the chat relay.
//!
//! Business types and the trait seams (stores, push sender) that the
//! usecase layer depends on. Free of transport and persistence
//! concerns.

pub mod entity;
pub mod error;
pub mod push;
pub mod store;
pub mod value_object;

pub use entity::{PushKeys, Room, StoredMessage, Subscription};
pub use error::{StoreError, ValueObjectError};
pub use push::{PushError, PushPayload, PushSender};
pub use store::{ChatStore, SubscriptionStore};
pub use value_object::{MessageBody, RoomName, Timestamp, Username};
