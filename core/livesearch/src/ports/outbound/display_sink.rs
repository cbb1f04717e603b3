//! 結果表示領域 Outbound ポート
//!
//! 書き込むのは Renderer だけ。内容は毎回まるごと置き換える（差分なし・履歴なし）。

use common::error::Error;

/// 表示領域
pub trait DisplaySink: Send {
    /// 表示内容を `content` で置き換える
    fn replace_content(&mut self, content: &str) -> Result<(), Error>;
}
