//! Core domain models for the whiteboard session server.

use serde::{Deserialize, Serialize};

use super::{
    element::DrawElement,
    value_object::{ConnectionId, DisplayName, MemberId, RoomCode, Timestamp},
};

/// Represents one participant's identity and permissions within a room.
///
/// A member is created on a successful join, mutated only by permission
/// changes, and removed on disconnect. It is never persisted beyond the
/// process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Name shown to other room members
    pub display_name: DisplayName,
    /// The room this member belongs to for its whole lifetime
    pub room_id: RoomCode,
    /// Client-generated identity, stable for this join
    pub member_id: MemberId,
    /// True iff this member created the room
    pub is_host: bool,
    /// Current drawing authorization (presenter flag)
    pub can_draw: bool,
    /// Back-reference to the active connection, used for addressing
    pub connection_id: ConnectionId,
    /// Timestamp when the member joined
    pub connected_at: Timestamp,
}

impl Member {
    /// Create a member for a host join. Hosts always start with draw
    /// permission.
    pub fn host(
        display_name: DisplayName,
        room_id: RoomCode,
        member_id: MemberId,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            display_name,
            room_id,
            member_id,
            is_host: true,
            can_draw: true,
            connection_id,
            connected_at,
        }
    }

    /// Create a member for a guest join. Guests start without draw
    /// permission until the host grants it.
    pub fn guest(
        display_name: DisplayName,
        room_id: RoomCode,
        member_id: MemberId,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            display_name,
            room_id,
            member_id,
            is_host: false,
            can_draw: false,
            connection_id,
            connected_at,
        }
    }
}

/// An isolated collaboration session identified by a code, owning the shared
/// board state for its members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Externally supplied room code, unique while the room is active
    pub code: RoomCode,
    /// The member who created the room; host privilege is permanent
    pub host_member_id: MemberId,
    /// Authoritative ordered canvas state
    pub board: Vec<DrawElement>,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new room with an empty board.
    pub fn new(code: RoomCode, host_member_id: MemberId, created_at: Timestamp) -> Self {
        Self {
            code,
            host_member_id,
            board: Vec::new(),
            created_at,
        }
    }

    /// Append one element to the board.
    pub fn append_element(&mut self, element: DrawElement) {
        self.board.push(element);
    }

    /// Overwrite the whole board. Full-replace is last-write-wins; clear is
    /// a replace with an empty sequence.
    pub fn replace_board(&mut self, elements: Vec<DrawElement>) {
        self.board = elements;
    }
}
