//! Outbound ポート: アプリが外界（時刻・ログ・環境変数・カタログ API）を使うための trait

pub mod catalog_client;
pub mod clock;
pub mod env_resolver;
pub mod log;

pub use catalog_client::CatalogClient;
pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
