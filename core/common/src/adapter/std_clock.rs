//! 標準時刻実装（Instant を委譲）

use crate::ports::outbound::Clock;
use std::time::Instant;

/// 生成時点を起点とする単調時計
///
/// 壁時計の巻き戻りで debounce の締め切りがずれないよう SystemTime は使わない。
#[derive(Debug, Clone)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}
