//! UseCase: チャットとタイピング通知のリレー
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::relay_targets() メソッド
//! - 送信者の解決（接続 ID から）とルーム内リレー対象の選定
//!
//! ### なぜこのテストが必要か
//! - 送信者名はメッセージではなく Registry から解決することを保証
//! - チャットは権限ゲートなしで全メンバーが送れることを確認
//! - 送信者自身にはリレーされないことを検証
//!
//! ### どのような状況を想定しているか
//! - 正常系：在室メンバーによるチャットとタイピング通知
//! - 異常系：未入室接続からの送信（破棄）
//! - エッジケース：送信者のみが在室している場合（リレー対象なし）

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, MemberRegistry};

use super::{error::ChatError, lock::SessionLock};

/// チャットリレーの結果
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// Registry から解決した送信者の表示名
    pub sender_name: DisplayName,
    /// リレー対象（送信者を除く在室接続）
    pub targets: Vec<ConnectionId>,
}

/// チャット・タイピング通知のユースケース
///
/// 本文は透過的にリレーするだけなので、ここでは扱わない。送信者の解決と
/// 対象選定だけを行い、チャットとタイピング通知で共用する。
pub struct SendChatUseCase {
    /// Member Registry（データアクセス層の抽象化）
    registry: Arc<dyn MemberRegistry>,
    /// イベント直列化ロック
    lock: SessionLock,
}

impl SendChatUseCase {
    /// 新しい SendChatUseCase を作成
    pub fn new(registry: Arc<dyn MemberRegistry>, lock: SessionLock) -> Self {
        Self { registry, lock }
    }

    /// 送信者を解決し、リレー対象を取得する
    ///
    /// 権限ゲートはない。どのメンバーもチャットできる。状態は保存しない。
    ///
    /// # Returns
    ///
    /// * `Ok(ChatOutcome)` - リレー対象と送信者名
    /// * `Err(ChatError)` - 未入室接続からの送信（破棄する）
    pub async fn relay_targets(
        &self,
        connection_id: ConnectionId,
    ) -> Result<ChatOutcome, ChatError> {
        let _guard = self.lock.acquire().await;

        let sender = self
            .registry
            .get(&connection_id)
            .await
            .ok_or(ChatError::NotJoined)?;

        let targets = self
            .registry
            .list_in_room(&sender.room_id)
            .await
            .into_iter()
            .filter(|m| m.connection_id != connection_id)
            .map(|m| m.connection_id)
            .collect();

        Ok(ChatOutcome {
            sender_name: sender.display_name,
            targets,
        })
    }
}
