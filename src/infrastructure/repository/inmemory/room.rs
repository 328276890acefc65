//! InMemory Room Directory 実装
//!
//! ドメイン層が定義する RoomDirectory trait の具体的な実装。
//! ルームコードをキーとした HashMap をインメモリ DB として使用します。
//! ボードの内容はルームが存続する間だけ保持され、永続化されません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DirectoryError, DrawElement, MemberId, Room, RoomCode, RoomDirectory, Timestamp};

/// インメモリ Room Directory 実装
pub struct InMemoryRoomDirectory {
    rooms: Mutex<HashMap<RoomCode, Room>>,
}

impl InMemoryRoomDirectory {
    /// 新しい空の InMemoryRoomDirectory を作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomDirectory {
    async fn create(
        &self,
        code: RoomCode,
        host_member_id: MemberId,
        created_at: Timestamp,
    ) -> Result<(), DirectoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&code) {
            return Err(DirectoryError::RoomConflict(code.into_string()));
        }
        rooms.insert(code.clone(), Room::new(code, host_member_id, created_at));
        Ok(())
    }

    async fn exists(&self, code: &RoomCode) -> bool {
        let rooms = self.rooms.lock().await;
        rooms.contains_key(code)
    }

    async fn destroy(&self, code: &RoomCode) {
        let mut rooms = self.rooms.lock().await;
        rooms.remove(code);
    }

    async fn board(&self, code: &RoomCode) -> Vec<DrawElement> {
        let rooms = self.rooms.lock().await;
        rooms.get(code).map(|r| r.board.clone()).unwrap_or_default()
    }

    async fn set_board(&self, code: &RoomCode, elements: Vec<DrawElement>) {
        let mut rooms = self.rooms.lock().await;
        if let Some(room) = rooms.get_mut(code) {
            room.replace_board(elements);
        }
    }

    async fn append_element(&self, code: &RoomCode, element: DrawElement) {
        let mut rooms = self.rooms.lock().await;
        if let Some(room) = rooms.get_mut(code) {
            room.append_element(element);
        }
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        rooms.values().cloned().collect()
    }
}
