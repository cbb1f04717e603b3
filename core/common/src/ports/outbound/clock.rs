//! 時刻 Outbound ポート
//!
//! debounce の締め切り計算はこの trait 経由で「現在時刻」を取得する。

/// 時刻取得の抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の手動時計など。
pub trait Clock: Send + Sync {
    /// 単調増加するミリ秒（起点は実装依存）
    fn now_ms(&self) -> u64;
}
