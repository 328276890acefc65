//! UseCase: 入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ホスト入室（ルーム作成）とゲスト入室（既存ルームへの参加）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：ルームコードの衝突と存在チェック
//! - ホスト / ゲストの初期権限（can_draw）が正しく設定されることを保証
//! - (room, member_id) の一意性の不変条件を Registry 追加前に守ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホストの新規ルーム作成、ゲストの参加
//! - 異常系：使用中コードでのホスト入室、存在しないルームへのゲスト入室
//! - エッジケース：重複 member_id、入室済み接続からの再入室

use std::sync::Arc;

use crate::{
    common::time::get_jst_timestamp,
    domain::{
        ConnectionId, DisplayName, DrawElement, Member, MemberId, MemberRegistry, RoomCode,
        RoomDirectory, Timestamp,
    },
};

use super::{error::JoinError, lock::SessionLock};

/// 入室要求（トランスポート境界で検証済みのドメインモデル）
#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub name: DisplayName,
    pub room_id: RoomCode,
    pub member_id: MemberId,
    pub host: bool,
}

/// 入室成功時の結果
///
/// UI 層はこの結果から `joined` / `member-list` / `member-joined` /
/// ボード同期の各メッセージを組み立てて送信します。
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// 作成されたメンバー
    pub member: Member,
    /// 入室後のルーム全員のスナップショット
    pub roster: Vec<Member>,
    /// 入室者へ送るボード内容（同期不要の場合は None）
    pub board: Option<Vec<DrawElement>>,
    /// member-joined の通知対象（入室者以外の在室接続）
    pub notify_targets: Vec<ConnectionId>,
}

/// 入室のユースケース
pub struct JoinRoomUseCase {
    /// Member Registry（データアクセス層の抽象化）
    registry: Arc<dyn MemberRegistry>,
    /// Room Directory（データアクセス層の抽象化）
    directory: Arc<dyn RoomDirectory>,
    /// イベント直列化ロック
    lock: SessionLock,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
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

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 入室要求を送った接続
    /// * `request` - 検証済みの入室要求
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 入室成功
    /// * `Err(JoinError)` - 入室失敗（状態は変更されない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        request: JoinRequest,
    ) -> Result<JoinOutcome, JoinError> {
        // 存在確認・一意性チェックと Registry への追加を原子的にするため、
        // イベント全体でロックを保持する
        let _guard = self.lock.acquire().await;

        // 1. 接続の状態機械: Unjoined からのみ入室できる
        if self.registry.get(&connection_id).await.is_some() {
            return Err(JoinError::AlreadyJoined);
        }

        let now = Timestamp::new(get_jst_timestamp());

        // 2. ルームの作成（ホスト）または存在確認（ゲスト）
        let member = if request.host {
            self.directory
                .create(request.room_id.clone(), request.member_id.clone(), now)
                .await
                .map_err(|_| JoinError::RoomExists(request.room_id.as_str().to_string()))?;

            Member::host(request.name, request.room_id, request.member_id, connection_id, now)
        } else {
            if !self.directory.exists(&request.room_id).await {
                return Err(JoinError::RoomNotFound(request.room_id.as_str().to_string()));
            }

            // (room, member_id) の一意性を Registry 追加前に保証する
            if self
                .registry
                .find_in_room(&request.room_id, &request.member_id)
                .await
                .is_some()
            {
                return Err(JoinError::DuplicateMember {
                    room_id: request.room_id.into_string(),
                    member_id: request.member_id.into_string(),
                });
            }

            Member::guest(request.name, request.room_id, request.member_id, connection_id, now)
        };

        // 3. Registry に追加し、入室後のロスターを得る
        let roster = self.registry.add(member.clone()).await;

        // 4. member-joined の通知対象（入室者以外）
        let notify_targets = roster
            .iter()
            .filter(|m| m.connection_id != connection_id)
            .map(|m| m.connection_id)
            .collect();

        // 5. 遅れて入室したゲストには現在のボードを同期する。
        //    ホスト入室直後のルームのボードは常に空なので同期不要。
        let board = if member.is_host {
            None
        } else {
            Some(self.directory.board(&member.room_id).await)
        };

        Ok(JoinOutcome {
            member,
            roster,
            board,
            notify_targets,
        })
    }
}
