//! HTTP API response DTOs for the whiteboard session server.

use serde::{Deserialize, Serialize};

/// Room summary for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub code: String,
    pub members: Vec<String>,
    pub created_at: String, // ISO 8601
}

/// Room detail for the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub code: String,
    pub host_member_id: String,
    pub members: Vec<MemberDetailDto>,
    /// Number of elements currently on the board
    pub element_count: usize,
    pub created_at: String, // ISO 8601
}

/// Member detail for the room detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub name: String,
    pub member_id: String,
    pub is_host: bool,
    pub can_draw: bool,
    pub connected_at: String, // ISO 8601
}
