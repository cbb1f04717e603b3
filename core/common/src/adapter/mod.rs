//! アダプター（外界の I/O を trait で抽象化）
//!
//! usecase は ports::outbound の trait 経由でのみ時刻・ログ・環境変数・HTTP に触れる。
//! 実装は標準実装（Std* / Http*）やテスト用のモックを注入する。

pub mod file_json_log;
pub mod http_catalog_client;
pub mod std_clock;
pub mod std_env_resolver;

pub use file_json_log::{FileJsonLog, NoopLog, StderrLog};
pub use http_catalog_client::{build_search_url, parse_base_url, parse_result_set, HttpCatalogClient};
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
