//! HTTP API endpoint handlers.
//!
//! A small read-only debug surface next to the liveness check; the whole
//! collaboration protocol runs over the WebSocket endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    common::time::timestamp_to_jst_rfc3339,
    domain::RoomCode,
    infrastructure::dto::http::{MemberDetailDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of active rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.directory.list_rooms().await;

    let mut summaries = Vec::with_capacity(rooms.len());
    for room in rooms {
        let members = state
            .registry
            .list_in_room(&room.code)
            .await
            .into_iter()
            .map(|m| m.display_name.into_string())
            .collect();
        summaries.push(RoomSummaryDto {
            code: room.code.into_string(),
            members,
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        });
    }
    summaries.sort_by(|a, b| a.code.cmp(&b.code));

    Json(summaries)
}

/// Get room detail by code
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_code): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let code = RoomCode::new(room_code).map_err(|_| StatusCode::BAD_REQUEST)?;

    let room = state
        .directory
        .list_rooms()
        .await
        .into_iter()
        .find(|r| r.code == code)
        .ok_or(StatusCode::NOT_FOUND)?;

    let members = state
        .registry
        .list_in_room(&room.code)
        .await
        .into_iter()
        .map(|m| MemberDetailDto {
            name: m.display_name.into_string(),
            member_id: m.member_id.into_string(),
            is_host: m.is_host,
            can_draw: m.can_draw,
            connected_at: timestamp_to_jst_rfc3339(m.connected_at.value()),
        })
        .collect();

    Ok(Json(RoomDetailDto {
        code: room.code.into_string(),
        host_member_id: room.host_member_id.into_string(),
        members,
        element_count: room.board.len(),
        created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
    }))
}
