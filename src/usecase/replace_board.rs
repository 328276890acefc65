//! UseCase: ボードの全置換（明示的更新・undo・redo・クリア）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReplaceBoardUseCase::replace() / clear() メソッド
//! - 全置換の last-write-wins と冪等性、描画権限の再チェック
//!
//! ### なぜこのテストが必要か
//! - 全置換はマージではなく完全上書きであることを保証（クリアは空列での置換）
//! - 同じペイロードの再適用が冪等であることを確認
//! - 増分描画と同じ can_draw 再チェックをサーバー側で行うこと
//!   （意図的な堅牢化）を検証
//!
//! ### どのような状況を想定しているか
//! - 正常系：プレゼンターによる置換・クリアとそのリレー
//! - 異常系：権限のない送信者による置換
//! - エッジケース：同一ペイロードの二重適用

use std::sync::Arc;

use crate::domain::{ConnectionId, DrawElement, Member, MemberRegistry, RoomCode, RoomDirectory};

use super::{error::BoardError, lock::SessionLock};

/// ボード全置換のユースケース
pub struct ReplaceBoardUseCase {
    /// Member Registry（データアクセス層の抽象化）
    registry: Arc<dyn MemberRegistry>,
    /// Room Directory（データアクセス層の抽象化）
    directory: Arc<dyn RoomDirectory>,
    /// イベント直列化ロック
    lock: SessionLock,
}

impl ReplaceBoardUseCase {
    /// 新しい ReplaceBoardUseCase を作成
    pub fn new(
        registry: Arc<dyn MemberRegistry>,
        directory: Arc<dyn RoomDirectory>,
        lock: SessionLock,
    ) -> Self {
        Self {
            registry,
            directory,
            lock,
        }
    }

    /// ボード全置換を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - board-replaced のリレー対象（送信者を除く）
    /// * `Err(BoardError)` - リレーしない（権限なしは permission-denied を返す）
    pub async fn replace(
        &self,
        connection_id: ConnectionId,
        room_id: RoomCode,
        elements: Vec<DrawElement>,
    ) -> Result<Vec<ConnectionId>, BoardError> {
        let _guard = self.lock.acquire().await;
        let sender = self.authorize(connection_id, &room_id).await?;

        // 最後に処理された全置換が常に勝つ（マージしない）
        self.directory.set_board(&sender.room_id, elements).await;

        Ok(self.relay_targets(&sender, connection_id).await)
    }

    /// ボードのクリアを実行（空列での全置換）
    pub async fn clear(
        &self,
        connection_id: ConnectionId,
        room_id: RoomCode,
    ) -> Result<Vec<ConnectionId>, BoardError> {
        let _guard = self.lock.acquire().await;
        let sender = self.authorize(connection_id, &room_id).await?;

        self.directory.set_board(&sender.room_id, Vec::new()).await;

        Ok(self.relay_targets(&sender, connection_id).await)
    }

    /// 送信者の解決と can_draw の再チェック。
    /// 増分描画と同じ認可をサーバー側で適用する（意図的な堅牢化）。
    async fn authorize(
        &self,
        connection_id: ConnectionId,
        room_id: &RoomCode,
    ) -> Result<Member, BoardError> {
        let sender = self
            .registry
            .get(&connection_id)
            .await
            .ok_or(BoardError::NotJoined)?;
        if &sender.room_id != room_id {
            return Err(BoardError::RoomMismatch);
        }
        if !sender.can_draw {
            return Err(BoardError::NotAuthorized);
        }
        Ok(sender)
    }

    async fn relay_targets(
        &self,
        sender: &Member,
        connection_id: ConnectionId,
    ) -> Vec<ConnectionId> {
        self.registry
            .list_in_room(&sender.room_id)
            .await
            .into_iter()
            .filter(|m| m.connection_id != connection_id)
            .map(|m| m.connection_id)
            .collect()
    }
}
