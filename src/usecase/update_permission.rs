//! UseCase: 描画権限の変更
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdatePermissionUseCase::execute() メソッド
//! - ホスト権限のサーバー側再検証と Registry の更新
//!
//! ### なぜこのテストが必要か
//! - セキュリティ検証：呼び出し元の is_host は接続 ID をキーに Registry から
//!   再導出する（クライアントが主張するフラグは決して信用しない）
//! - 非ホストからの権限変更がいかなるペイロードでも状態を変えないことを保証
//! - 対象メンバーが既に切断していた場合に黙って no-op になることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホストによる権限の付与・剥奪
//! - 攻撃系：ゲスト・未入室接続・他ルームのホストからの変更要求
//! - エッジケース：切断済みメンバーを対象とした変更

use std::sync::Arc;

use crate::domain::{ConnectionId, Member, MemberId, MemberRegistry, RoomCode};

use super::lock::SessionLock;

/// 権限変更の結果
#[derive(Debug, Clone)]
pub enum PermissionOutcome {
    /// ホスト以外からの要求。黙って無視する（ブロードキャストもエラーもなし）
    Denied,
    /// 権限を更新した
    Applied {
        /// 更新後のルーム全員のスナップショット
        roster: Vec<Member>,
        /// member-list のブロードキャスト対象（ルーム全員）
        room_targets: Vec<ConnectionId>,
        /// permission-changed のユニキャスト先。対象が要求と適用の間に
        /// 切断していた場合は None
        target_connection: Option<ConnectionId>,
        /// 適用後の権限値
        can_draw: bool,
    },
}

/// 描画権限変更のユースケース
pub struct UpdatePermissionUseCase {
    /// Member Registry（データアクセス層の抽象化）
    registry: Arc<dyn MemberRegistry>,
    /// イベント直列化ロック
    lock: SessionLock,
}

impl UpdatePermissionUseCase {
    /// 新しい UpdatePermissionUseCase を作成
    pub fn new(registry: Arc<dyn MemberRegistry>, lock: SessionLock) -> Self {
        Self { registry, lock }
    }

    /// 権限変更を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 要求を送った接続
    /// * `room_id` - 対象ルーム
    /// * `target_member_id` - 権限を変更するメンバー
    /// * `can_draw` - 付与する権限値
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomCode,
        target_member_id: MemberId,
        can_draw: bool,
    ) -> PermissionOutcome {
        let _guard = self.lock.acquire().await;

        // 呼び出し元の権限は Registry の状態から再導出する。
        // メッセージ中のフラグは認可判断に使わない。
        let Some(caller) = self.registry.get(&connection_id).await else {
            return PermissionOutcome::Denied;
        };
        if !caller.is_host || caller.room_id != room_id {
            return PermissionOutcome::Denied;
        }

        // 対象が切断済みなら Registry 側で no-op になるため、
        // 適用後のロスターを再取得して実際の状態を配る。
        self.registry
            .set_draw_permission(&room_id, &target_member_id, can_draw)
            .await;

        let roster = self.registry.list_in_room(&room_id).await;
        let room_targets = roster.iter().map(|m| m.connection_id).collect();
        let target_connection = roster
            .iter()
            .find(|m| m.member_id == target_member_id)
            .map(|m| m.connection_id);

        PermissionOutcome::Applied {
            roster,
            room_targets,
            target_connection,
            can_draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, Timestamp, repository::MockMemberRegistry},
        infrastructure::repository::InMemoryMemberRegistry,
    };

    fn room() -> RoomCode {
        RoomCode::new("R1".to_string()).unwrap()
    }

    fn member_id(s: &str) -> MemberId {
        MemberId::new(s.to_string()).unwrap()
    }

    async fn setup_room(registry: &InMemoryMemberRegistry) -> (ConnectionId, ConnectionId) {
        let host_conn = ConnectionId::generate();
        let guest_conn = ConnectionId::generate();
        registry
            .add(Member::host(
                DisplayName::new("alice".to_string()).unwrap(),
                room(),
                member_id("m-host"),
                host_conn,
                Timestamp::new(1000),
            ))
            .await;
        registry
            .add(Member::guest(
                DisplayName::new("bob".to_string()).unwrap(),
                room(),
                member_id("m-guest"),
                guest_conn,
                Timestamp::new(2000),
            ))
            .await;
        (host_conn, guest_conn)
    }

    #[tokio::test]
    async fn test_host_grants_draw_permission() {
        // テスト項目: ホストがゲストに描画権限を付与できる
        // given (前提条件):
        let registry = Arc::new(InMemoryMemberRegistry::new());
        let (host_conn, guest_conn) = setup_room(&registry).await;
        let usecase = UpdatePermissionUseCase::new(registry.clone(), SessionLock::new());

        // when (操作):
        let outcome = usecase
            .execute(host_conn, room(), member_id("m-guest"), true)
            .await;

        // then (期待する結果):
        match outcome {
            PermissionOutcome::Applied {
                roster,
                room_targets,
                target_connection,
                can_draw,
            } => {
                assert!(can_draw);
                assert_eq!(target_connection, Some(guest_conn));
                assert_eq!(room_targets.len(), 2);
                let guest = roster
                    .iter()
                    .find(|m| m.member_id.as_str() == "m-guest")
                    .unwrap();
                assert!(guest.can_draw);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_host_request_never_changes_state() {
        // テスト項目: 非ホストからの権限変更はいかなるペイロードでも状態を変えない
        // given (前提条件):
        let registry = Arc::new(InMemoryMemberRegistry::new());
        let (_host_conn, guest_conn) = setup_room(&registry).await;
        let usecase = UpdatePermissionUseCase::new(registry.clone(), SessionLock::new());

        // when (操作): ゲストが自分自身に権限を付与しようとする
        let outcome = usecase
            .execute(guest_conn, room(), member_id("m-guest"), true)
            .await;

        // then (期待する結果): 拒否され、Registry の状態は変化しない
        assert!(matches!(outcome, PermissionOutcome::Denied));
        let guest = registry
            .find_in_room(&room(), &member_id("m-guest"))
            .await
            .unwrap();
        assert!(!guest.can_draw);
    }

    #[tokio::test]
    async fn test_unjoined_connection_is_denied() {
        // テスト項目: 未入室の接続からの権限変更は拒否される
        // given (前提条件):
        let registry = Arc::new(InMemoryMemberRegistry::new());
        setup_room(&registry).await;
        let usecase = UpdatePermissionUseCase::new(registry.clone(), SessionLock::new());

        // when (操作):
        let outcome = usecase
            .execute(ConnectionId::generate(), room(), member_id("m-guest"), true)
            .await;

        // then (期待する結果):
        assert!(matches!(outcome, PermissionOutcome::Denied));
    }

    #[tokio::test]
    async fn test_host_of_another_room_is_denied() {
        // テスト項目: 別ルームのホストからの権限変更は拒否される
        // given (前提条件):
        let registry = Arc::new(InMemoryMemberRegistry::new());
        setup_room(&registry).await;
        let other_host_conn = ConnectionId::generate();
        registry
            .add(Member::host(
                DisplayName::new("carol".to_string()).unwrap(),
                RoomCode::new("R2".to_string()).unwrap(),
                member_id("m-carol"),
                other_host_conn,
                Timestamp::new(3000),
            ))
            .await;
        let usecase = UpdatePermissionUseCase::new(registry.clone(), SessionLock::new());

        // when (操作): R2 のホストが R1 のゲストの権限を変更しようとする
        let outcome = usecase
            .execute(other_host_conn, room(), member_id("m-guest"), true)
            .await;

        // then (期待する結果):
        assert!(matches!(outcome, PermissionOutcome::Denied));
        let guest = registry
            .find_in_room(&room(), &member_id("m-guest"))
            .await
            .unwrap();
        assert!(!guest.can_draw);
    }

    #[tokio::test]
    async fn test_target_disconnected_before_apply() {
        // テスト項目: 対象メンバーが切断済みの場合、ユニキャスト先は None になる
        // given (前提条件):
        let registry = Arc::new(InMemoryMemberRegistry::new());
        let (host_conn, guest_conn) = setup_room(&registry).await;
        registry.remove(&guest_conn).await;
        let usecase = UpdatePermissionUseCase::new(registry.clone(), SessionLock::new());

        // when (操作):
        let outcome = usecase
            .execute(host_conn, room(), member_id("m-guest"), true)
            .await;

        // then (期待する結果): 適用は no-op、ロスターにはホストのみ
        match outcome {
            PermissionOutcome::Applied {
                roster,
                target_connection,
                ..
            } => {
                assert_eq!(target_connection, None);
                assert_eq!(roster.len(), 1);
                assert_eq!(roster[0].member_id.as_str(), "m-host");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_denied_request_never_touches_registry_mutation() {
        // テスト項目: 拒否された要求では set_draw_permission が一切呼ばれない
        // given (前提条件): ゲストとして解決される接続を返すモック
        let mut mock = MockMemberRegistry::new();
        let guest_conn = ConnectionId::generate();
        mock.expect_get().returning(move |_| {
            Some(Member::guest(
                DisplayName::new("bob".to_string()).unwrap(),
                RoomCode::new("R1".to_string()).unwrap(),
                MemberId::new("m-guest".to_string()).unwrap(),
                guest_conn,
                Timestamp::new(2000),
            ))
        });
        mock.expect_set_draw_permission().times(0);
        let usecase = UpdatePermissionUseCase::new(Arc::new(mock), SessionLock::new());

        // when (操作):
        let outcome = usecase
            .execute(
                guest_conn,
                RoomCode::new("R1".to_string()).unwrap(),
                MemberId::new("m-guest".to_string()).unwrap(),
                true,
            )
            .await;

        // then (期待する結果): モックの times(0) が検証される
        assert!(matches!(outcome, PermissionOutcome::Denied));
    }
}
