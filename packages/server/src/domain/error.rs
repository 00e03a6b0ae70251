//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Object validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Username validation error
    #[error("username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// Room name validation error (empty after trimming)
    #[error("room name cannot be empty")]
    RoomNameEmpty,

    /// Room name too long error
    #[error("room name cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// Message body validation error
    #[error("message body cannot be empty")]
    MessageBodyEmpty,

    /// Message body too long error
    #[error("message body cannot exceed {max} characters (got {actual})")]
    MessageBodyTooLong { max: usize, actual: usize },
}

/// Errors surfaced by the durable stores.
///
/// A failing store call aborts the event being processed and is
/// logged; it never tears down the connection or the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Room lookup failed
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// Message lookup failed
    #[error("message not found: {0}")]
    MessageNotFound(String),

    /// Connectivity / query failure against the backing store
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
