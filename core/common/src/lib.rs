//! livesearch 共通ライブラリ
//!
//! CLI フロントエンドと共有するエラー型・ドメイン型・Outbound ポートと標準アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// カタログのドメイン型（Record / ResultSet）
pub mod domain;

/// Outbound ポート（trait）
pub mod ports;

/// ポートの標準実装
pub mod adapter;
