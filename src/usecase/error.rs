//! UseCase 層のエラー定義
//!
//! すべてイベント単位で回復されるエラーであり、プロセスを停止させる
//! ものはありません。

use thiserror::Error;

/// 入室処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// ホストが使用中のルームコードで作成を試みた（要求者へ room-exists を返す）
    #[error("room '{0}' already exists")]
    RoomExists(String),

    /// ゲストが存在しないルームへ参加を試みた（要求者へ room-not-found を返す）
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    /// この接続は既に入室済み（イベントは破棄する）
    #[error("connection has already joined a room")]
    AlreadyJoined,

    /// 同じ (room, member_id) のメンバーが既に在室している（イベントは破棄する）
    #[error("member '{member_id}' is already live in room '{room_id}'")]
    DuplicateMember { room_id: String, member_id: String },
}

/// 描画リレーのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// 未入室の接続からのイベント（破棄する）
    #[error("connection has not joined a room")]
    NotJoined,

    /// メッセージ中のルームが送信者の在室ルームと一致しない（破棄する）
    #[error("room in message does not match sender's room")]
    RoomMismatch,

    /// 送信者に描画権限がない（permission-denied を返す）
    #[error("sender is not authorized to draw")]
    NotAuthorized,
}

/// ボード全置換のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// 未入室の接続からのイベント（破棄する）
    #[error("connection has not joined a room")]
    NotJoined,

    /// メッセージ中のルームが送信者の在室ルームと一致しない（破棄する）
    #[error("room in message does not match sender's room")]
    RoomMismatch,

    /// 送信者に描画権限がない（permission-denied を返す）
    #[error("sender is not authorized to mutate the board")]
    NotAuthorized,
}

/// チャット・タイピング通知のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// 未入室の接続からのイベント（破棄する）
    #[error("connection has not joined a room")]
    NotJoined,
}
