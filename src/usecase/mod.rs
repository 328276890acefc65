//! UseCase 層
//!
//! セッションコーディネータを構成するレイヤー。受信イベントごとに
//! Registry / Directory を検証・更新し、宛先付きの送信対象を決定します。
//! UI 層から呼び出され、Domain 層を操作します。ネットワークには触れません。

pub mod disconnect_member;
pub mod error;
pub mod join_room;
pub mod lock;
pub mod relay_draw;
pub mod replace_board;
pub mod send_chat;
pub mod update_permission;

pub use disconnect_member::{DisconnectMemberUseCase, DisconnectOutcome};
pub use error::{BoardError, ChatError, DrawError, JoinError};
pub use join_room::{JoinOutcome, JoinRequest, JoinRoomUseCase};
pub use lock::SessionLock;
pub use relay_draw::RelayDrawUseCase;
pub use replace_board::ReplaceBoardUseCase;
pub use send_chat::{ChatOutcome, SendChatUseCase};
pub use update_permission::{PermissionOutcome, UpdatePermissionUseCase};
