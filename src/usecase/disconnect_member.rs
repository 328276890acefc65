//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectMemberUseCase::execute() メソッド
//! - メンバー削除、最後の 1 人が退室した際のルーム破棄、残存者への通知対象選定
//!
//! ### なぜこのテストが必要か
//! - 不変条件の検証：空になったルームは Directory から即座に消える
//!   （空ルームの取り残しを許さない）
//! - 未入室接続の切断が no-op であることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：残存者がいる切断（通知対象あり）
//! - エッジケース：最後の 1 人の切断（ルームとボードの破棄）
//! - 異常系：一度も入室しなかった接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, Member, MemberRegistry, RoomDirectory};

use super::lock::SessionLock;

/// 切断処理の結果
#[derive(Debug, Clone)]
pub enum DisconnectOutcome {
    /// 接続は一度も入室していなかった（何もしない）
    NotJoined,
    /// 最後の 1 人が退室し、ルームとボードを破棄した
    RoomClosed { member: Member },
    /// 退室し、残存メンバーへ通知する
    Departed {
        member: Member,
        /// 退室後のルーム全員のスナップショット
        roster: Vec<Member>,
        /// member-left / member-list の通知対象
        notify_targets: Vec<ConnectionId>,
    },
}

/// 切断のユースケース
pub struct DisconnectMemberUseCase {
    /// Member Registry（データアクセス層の抽象化）
    registry: Arc<dyn MemberRegistry>,
    /// Room Directory（データアクセス層の抽象化）
    directory: Arc<dyn RoomDirectory>,
    /// イベント直列化ロック
    lock: SessionLock,
}

impl DisconnectMemberUseCase {
    /// 新しい DisconnectMemberUseCase を作成
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

    /// 切断を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 閉じられた接続
    pub async fn execute(&self, connection_id: ConnectionId) -> DisconnectOutcome {
        // remove と destroy の間に同じルームへの入室が割り込まないよう、
        // イベント全体でロックを保持する
        let _guard = self.lock.acquire().await;

        let Some((member, residual)) = self.registry.remove(&connection_id).await else {
            return DisconnectOutcome::NotJoined;
        };

        if residual.is_empty() {
            // 空になったルームは即座に破棄する（ボードも失われる）
            self.directory.destroy(&member.room_id).await;
            return DisconnectOutcome::RoomClosed { member };
        }

        let notify_targets = residual.iter().map(|m| m.connection_id).collect();
        DisconnectOutcome::Departed {
            member,
            roster: residual,
            notify_targets,
        }
    }
}
