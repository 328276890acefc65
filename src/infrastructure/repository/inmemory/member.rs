//! InMemory Member Registry 実装
//!
//! ドメイン層が定義する MemberRegistry trait の具体的な実装。
//! 接続 ID をキーとした HashMap をインメモリ DB として使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Member, MemberId, MemberRegistry, RoomCode};

/// インメモリ Member Registry 実装
///
/// 接続中の全メンバーをフラットに保持します。部屋ごとの絞り込みは
/// `room_id` によるフィルタで行います。
pub struct InMemoryMemberRegistry {
    members: Mutex<HashMap<ConnectionId, Member>>,
}

impl InMemoryMemberRegistry {
    /// 新しい空の InMemoryMemberRegistry を作成
    pub fn new() -> Self {
        Self {
            members: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryMemberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberRegistry for InMemoryMemberRegistry {
    async fn add(&self, member: Member) -> Vec<Member> {
        let mut members = self.members.lock().await;
        let room_id = member.room_id.clone();
        members.insert(member.connection_id, member);
        members
            .values()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect()
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<(Member, Vec<Member>)> {
        let mut members = self.members.lock().await;
        let removed = members.remove(connection_id)?;
        let residual = members
            .values()
            .filter(|m| m.room_id == removed.room_id)
            .cloned()
            .collect();
        Some((removed, residual))
    }

    async fn get(&self, connection_id: &ConnectionId) -> Option<Member> {
        let members = self.members.lock().await;
        members.get(connection_id).cloned()
    }

    async fn find_in_room(&self, room_id: &RoomCode, member_id: &MemberId) -> Option<Member> {
        let members = self.members.lock().await;
        members
            .values()
            .find(|m| &m.room_id == room_id && &m.member_id == member_id)
            .cloned()
    }

    async fn list_in_room(&self, room_id: &RoomCode) -> Vec<Member> {
        let members = self.members.lock().await;
        members
            .values()
            .filter(|m| &m.room_id == room_id)
            .cloned()
            .collect()
    }

    async fn set_draw_permission(&self, room_id: &RoomCode, member_id: &MemberId, can_draw: bool) {
        let mut members = self.members.lock().await;
        if let Some(member) = members
            .values_mut()
            .find(|m| &m.room_id == room_id && &m.member_id == member_id)
        {
            member.can_draw = can_draw;
        }
        // No match is a silent no-op: the target may already have disconnected.
    }
}
