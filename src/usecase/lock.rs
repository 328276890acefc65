//! セッションコーディネータのイベント直列化
//!
//! 各ユースケースは Registry と Directory をまたいで check-then-act を行い、
//! その間に await ポイントがあります。このロックをイベント全体で保持する
//! ことで、各ルームの（メンバー集合・ボード）の遷移を原子的にします。
//! 切断とゲスト入室が同じルーム上で交錯したり、同じ (room, member_id) の
//! 入室が 2 件とも一意性チェックを通過したりすることはありません。

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// コーディネータイベントを直列化するロック
///
/// `AppState` ごとに 1 つ共有され、すべてのユースケースが `execute` の
/// 先頭で獲得します。獲得はイベントの到着順で、ガードのドロップで解放
/// されます。
#[derive(Clone, Default)]
pub struct SessionLock {
    inner: Arc<Mutex<()>>,
}

impl SessionLock {
    /// 新しい SessionLock を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// イベント 1 件の処理のあいだロックを獲得する
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
