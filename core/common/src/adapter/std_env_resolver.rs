//! 標準環境変数解決実装（std::env を委譲）

use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl EnvResolver for StdEnvResolver {
    fn catalog_url(&self) -> Option<String> {
        non_empty_var("LIVESEARCH_BASE_URL")
    }

    fn debounce_ms(&self) -> Option<String> {
        non_empty_var("LIVESEARCH_DEBOUNCE_MS")
    }

    fn log_file_path(&self) -> Option<PathBuf> {
        non_empty_var("LIVESEARCH_LOG_FILE").map(PathBuf::from)
    }
}
