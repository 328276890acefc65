//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomCode validation error
    #[error("RoomCode cannot be empty")]
    RoomCodeEmpty,

    /// RoomCode too long error
    #[error("RoomCode cannot exceed {max} characters (got {actual})")]
    RoomCodeTooLong { max: usize, actual: usize },

    /// MemberId validation error
    #[error("MemberId cannot be empty")]
    MemberIdEmpty,

    /// MemberId too long error
    #[error("MemberId cannot exceed {max} characters (got {actual})")]
    MemberIdTooLong { max: usize, actual: usize },

    /// DisplayName validation error
    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,

    /// DisplayName too long error
    #[error("DisplayName cannot exceed {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    /// ChatText validation error
    #[error("ChatText cannot be empty")]
    ChatTextEmpty,

    /// ChatText too long error
    #[error("ChatText cannot exceed {max} characters (got {actual})")]
    ChatTextTooLong { max: usize, actual: usize },
}

/// Errors related to the room directory
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Room code is already in use by an active room
    #[error("Room '{0}' is already active")]
    RoomConflict(String),
}
