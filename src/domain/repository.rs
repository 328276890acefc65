//! Repository traits owned by the domain layer.
//!
//! The usecase layer depends on these traits, not on the in-memory
//! implementations in the infrastructure layer (dependency inversion).

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{
    element::DrawElement,
    entity::{Member, Room},
    error::DirectoryError,
    value_object::{ConnectionId, MemberId, RoomCode, Timestamp},
};

/// The flat set of connected participants and their per-room attributes.
///
/// Pure data plus accessors; the registry knows nothing about networking.
/// Uniqueness of `(room_id, member_id)` is guaranteed by the caller before
/// `add` is invoked.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MemberRegistry: Send + Sync {
    /// Insert a member and return the full member list of that member's room.
    async fn add(&self, member: Member) -> Vec<Member>;

    /// Remove the member bound to the given connection, if any.
    ///
    /// Returns the removed member together with the residual members of its
    /// room. Removing an unknown connection is a no-op, not an error.
    async fn remove(&self, connection_id: &ConnectionId) -> Option<(Member, Vec<Member>)>;

    /// Look up the member bound to a connection. Absence is an expected,
    /// non-fatal outcome (stale or never-joined connections).
    async fn get(&self, connection_id: &ConnectionId) -> Option<Member>;

    /// Look up a member by room and member id.
    async fn find_in_room(&self, room_id: &RoomCode, member_id: &MemberId) -> Option<Member>;

    /// All live members with the given room id.
    async fn list_in_room(&self, room_id: &RoomCode) -> Vec<Member>;

    /// Mutate the matching member's draw permission in place.
    ///
    /// Silent no-op when there is no match: the target may have disconnected
    /// between the request and its application, so callers must re-fetch the
    /// room list afterwards rather than assume success.
    async fn set_draw_permission(&self, room_id: &RoomCode, member_id: &MemberId, can_draw: bool);
}

/// Tracks which room codes are currently active and owns each room's board
/// state.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Register an empty room under the given code.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::RoomConflict` if the code is already active.
    async fn create(
        &self,
        code: RoomCode,
        host_member_id: MemberId,
        created_at: Timestamp,
    ) -> Result<(), DirectoryError>;

    /// Whether a room with the given code is currently active.
    async fn exists(&self, code: &RoomCode) -> bool;

    /// Remove the room and discard its board state. Safe to call on an
    /// already-absent room.
    async fn destroy(&self, code: &RoomCode);

    /// Snapshot of the room's board. Empty when the room is absent.
    async fn board(&self, code: &RoomCode) -> Vec<DrawElement>;

    /// Replace the room's board wholesale (last-full-state-wins). No-op when
    /// the room is absent.
    async fn set_board(&self, code: &RoomCode, elements: Vec<DrawElement>);

    /// Append one element to the room's board. No-op when the room is absent.
    async fn append_element(&self, code: &RoomCode, element: DrawElement);

    /// Snapshot of all active rooms.
    async fn list_rooms(&self) -> Vec<Room>;
}
