//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::StoreError;

/// Errors from the delete-message usecase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeleteMessageError {
    /// No message with the given id
    #[error("message not found: {0}")]
    NotFound(String),

    /// Author-only policy is on and the requester is not the author
    #[error("user {requester} may not delete message {id}")]
    NotAuthor { id: String, requester: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from the delete-group usecase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeleteGroupError {
    /// No room with the given name
    #[error("room not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
