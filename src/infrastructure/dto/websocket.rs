//! WebSocket message DTOs for the whiteboard session server.
//!
//! Both directions are closed, internally tagged enums. Payloads are
//! validated at the transport boundary; unknown or malformed shapes fail
//! deserialization and are dropped with a diagnostic, never partially
//! processed.

use serde::{Deserialize, Serialize};

use crate::domain::{DrawElement, Member};

/// Messages received from clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Request to create (host) or enter (guest) a room
    Join {
        name: String,
        room_id: String,
        member_id: String,
        host: bool,
    },
    /// Host-only request to change a member's draw permission;
    /// re-validated server-side
    SetPermission {
        room_id: String,
        target_member_id: String,
        can_draw: bool,
    },
    /// Single incremental drawing element
    DrawElement {
        room_id: String,
        element: DrawElement,
    },
    /// Full-state overwrite (explicit update / undo / redo)
    BoardReplace {
        room_id: String,
        elements: Vec<DrawElement>,
    },
    /// Full-state overwrite to empty
    BoardClear { room_id: String },
    /// Chat message; the sender is resolved server-side from the connection
    ChatMessage { text: String },
    /// Transient typing indicator, no state stored
    TypingStart,
    TypingStop,
}

/// Messages sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Join confirmation, unicast to the joiner only
    Joined {
        name: String,
        room_id: String,
        member_id: String,
        is_host: bool,
        can_draw: bool,
    },
    /// Host join rejected: the room code is already active
    RoomExists,
    /// Guest join rejected: no such room
    RoomNotFound,
    /// Full room roster, broadcast to the room
    MemberList { members: Vec<MemberInfo> },
    /// Broadcast to the room except the joiner
    MemberJoined { name: String },
    /// Broadcast to the residual room members
    MemberLeft { name: String },
    /// Unicast to the member whose permission changed
    PermissionChanged { can_draw: bool },
    /// Relayed to the room except the sender
    ElementReceived { element: DrawElement },
    /// Relayed to the room except the sender; also used to send the current
    /// board to a late joiner
    BoardReplaced { elements: Vec<DrawElement> },
    /// Relayed to the room except the sender
    BoardCleared,
    /// Relayed to the room except the sender
    ChatReceived { text: String, name: String },
    /// Transient typing indicators
    TypingStarted { name: String },
    TypingStopped,
    /// Unicast to an unauthorized actor
    PermissionDenied,
}

/// One member's snapshot within a `member-list` roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub name: String,
    pub member_id: String,
    pub is_host: bool,
    pub can_draw: bool,
    /// Unix timestamp (milliseconds since epoch) in JST
    pub connected_at: i64,
}

impl MemberInfo {
    /// Build a roster from registry members, ordered by join time then
    /// member id for a stable presentation.
    pub fn roster(mut members: Vec<Member>) -> Vec<Self> {
        members.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then_with(|| a.member_id.as_str().cmp(b.member_id.as_str()))
        });
        members
            .into_iter()
            .map(|m| Self {
                name: m.display_name.into_string(),
                member_id: m.member_id.into_string(),
                is_host: m.is_host,
                can_draw: m.can_draw,
                connected_at: m.connected_at.value(),
            })
            .collect()
    }
}
