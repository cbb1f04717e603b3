//! Debouncer: 静止時間のあいだ上書きされなかった値だけを通す
//!
//! 保留中の値は常に高々 1 つ。新しい値が来るたびに締め切りを張り直し、古い値は捨てる。
//! 時刻は呼び出し側が渡す（Clock ポートの now_ms）。
//! now_ms は切り捨てなので、押された時刻を 1ms 切り上げて締め切りを決める。
//! こうすると実時間で静止時間より早く確定することはない。

use crate::domain::QueryString;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending {
    value: QueryString,
    deadline_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_ms: u64,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet_ms: quiet.as_millis() as u64,
            pending: None,
        }
    }

    /// 値を保留し、締め切りを `now_ms + 1 + quiet` に張り直す。
    /// 既に保留中の値を捨てた場合は true。
    pub fn push(&mut self, value: QueryString, now_ms: u64) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            deadline_ms: now_ms.saturating_add(1).saturating_add(self.quiet_ms),
        });
        replaced
    }

    /// 保留中の値を確定させずに捨てる
    pub fn cancel(&mut self) -> Option<QueryString> {
        self.pending.take().map(|p| p.value)
    }

    /// 保留中の値が確定する時刻
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline_ms)
    }

    /// 締め切りを過ぎていれば保留中の値を取り出す（1 回だけ）
    pub fn poll(&mut self, now_ms: u64) -> Option<QueryString> {
        match &self.pending {
            Some(p) if now_ms >= p.deadline_ms => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}
