//! Domain layer for the whiteboard session server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod element;
pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use element::DrawElement;
pub use entity::{Member, Room};
pub use error::{DirectoryError, ValueObjectError};
pub use repository::{MemberRegistry, RoomDirectory};
pub use value_object::{ChatText, ConnectionId, DisplayName, MemberId, RoomCode, Timestamp};
