//! 環境変数解決 Outbound ポート
//!
//! CLI 引数で指定されなかった設定値のフォールバック元。空文字列は未設定として扱う。

use std::path::PathBuf;

/// 環境変数から設定値を引く能力
pub trait EnvResolver: Send + Sync {
    /// LIVESEARCH_BASE_URL: カタログ API のベース URL
    fn catalog_url(&self) -> Option<String>;
    /// LIVESEARCH_DEBOUNCE_MS: debounce の静止時間（未解析の文字列）
    fn debounce_ms(&self) -> Option<String>;
    /// LIVESEARCH_LOG_FILE: JSONL ログの出力先
    fn log_file_path(&self) -> Option<PathBuf>;
}
