//! UseCase: 増分描画のリレー
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayDrawUseCase::execute() メソッド
//! - 描画権限のサーバー側再チェックと、送信者を除くリレー対象の選定
//!
//! ### なぜこのテストが必要か
//! - セキュリティ検証：can_draw はメッセージではなく Registry の状態から
//!   再チェックする
//! - 権限のない描画が 1 件もリレーされないことを保証
//! - 許可された描画がボードに追記されることを確認（遅参者の同期のため）
//!
//! ### どのような状況を想定しているか
//! - 正常系：プレゼンターによる描画のリレー
//! - 異常系：権限のないゲスト・未入室接続からの描画
//! - エッジケース：メッセージ中のルームと在室ルームの不一致

use std::sync::Arc;

use crate::domain::{ConnectionId, DrawElement, MemberRegistry, RoomCode, RoomDirectory};

use super::{error::DrawError, lock::SessionLock};

/// 増分描画リレーのユースケース
pub struct RelayDrawUseCase {
    /// Member Registry（データアクセス層の抽象化）
    registry: Arc<dyn MemberRegistry>,
    /// Room Directory（データアクセス層の抽象化）
    directory: Arc<dyn RoomDirectory>,
    /// イベント直列化ロック
    lock: SessionLock,
}

impl RelayDrawUseCase {
    /// 新しい RelayDrawUseCase を作成
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

    /// 描画リレーを実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 描画を送った接続
    /// * `room_id` - メッセージ中のルーム（送信者の在室ルームと一致が必要）
    /// * `element` - 増分要素
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - element-received のリレー対象（送信者を除く）
    /// * `Err(DrawError)` - リレーしない（権限なしは permission-denied を返す）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomCode,
        element: DrawElement,
    ) -> Result<Vec<ConnectionId>, DrawError> {
        let _guard = self.lock.acquire().await;

        // 送信者の権限は Registry の状態から再チェックする
        let sender = self
            .registry
            .get(&connection_id)
            .await
            .ok_or(DrawError::NotJoined)?;
        if sender.room_id != room_id {
            return Err(DrawError::RoomMismatch);
        }
        if !sender.can_draw {
            return Err(DrawError::NotAuthorized);
        }

        // 遅れて入室するゲストが現在の絵を受け取れるよう、要素を
        // 権威あるボードへ追記してからリレーする
        self.directory
            .append_element(&sender.room_id, element)
            .await;

        let targets = self
            .registry
            .list_in_room(&sender.room_id)
            .await
            .into_iter()
            .filter(|m| m.connection_id != connection_id)
            .map(|m| m.connection_id)
            .collect();

        Ok(targets)
    }
}
