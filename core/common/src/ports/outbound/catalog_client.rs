//! カタログ検索 Outbound ポート
//!
//! 名前の部分一致でレコードを引く 1 回の HTTP 呼び出しを抽象化する。
//! 呼び出しはワーカースレッドから行われるため Send + Sync を要求する。

use crate::domain::ResultSet;
use crate::error::Error;

/// カタログ API クライアント
pub trait CatalogClient: Send + Sync {
    /// `by_name` フィルタで検索し、API が返した順序のまま結果を返す。
    ///
    /// 通信失敗・非 2xx・不正な本文はすべて Err。空文字列もそのまま送る。
    fn search(&self, query: &str) -> Result<ResultSet, Error>;
}
