//! UseCase 層: 入力通知を検索・描画へ流すパイプライン
//!
//! 段の順序: 抽出 → debounce → 重複抑止 → 最新のみ取得 → 描画。
//! 各段は純粋な状態機械で、時刻・HTTP・表示はポート経由で注入する。

pub mod debounce;
pub mod dedupe;
pub mod fetcher;
pub mod live_search;
pub mod render;

pub use debounce::Debouncer;
pub use dedupe::Deduplicator;
pub use fetcher::{FetchOutcome, LatestFetcher, Settled};
pub use live_search::{LiveSearchUseCase, PipelineSettings, RunSummary, DEFAULT_DEBOUNCE_MS};
pub use render::{Renderer, SEPARATOR};
