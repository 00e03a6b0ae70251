//! UseCase layer.
//!
//! One usecase per inbound event. Each struct holds its collaborators
//! behind `Arc<dyn …>` trait objects and exposes a single `execute`;
//! the WebSocket handler validates the wire payload, invokes the
//! usecase, and performs the actual channel sends from the snapshots
//! the usecase returns.

pub mod delete_group;
pub mod delete_message;
pub mod disconnect;
pub mod dispatch_push;
pub mod error;
pub mod init_session;
pub mod join_room;
pub mod send_message;

pub use delete_group::{DeleteGroupOutcome, DeleteGroupUseCase};
pub use delete_message::{DeleteMessageOutcome, DeleteMessageUseCase};
pub use disconnect::{DisconnectOutcome, DisconnectUseCase};
pub use dispatch_push::DispatchPushUseCase;
pub use error::{DeleteGroupError, DeleteMessageError};
pub use init_session::InitSessionUseCase;
pub use join_room::{JoinRoomOutcome, JoinRoomUseCase};
pub use send_message::SendMessageUseCase;
