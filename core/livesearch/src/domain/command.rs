//! CLI から導出される実行コマンド

use std::time::Duration;

/// 入力元の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// TTY を raw モードにしてキー入力ごとに通知する
    Keystroke,
    /// 1 行 = 入力欄の全文として読む（パイプ入力など）
    Lines,
}

/// 表示先の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// プロンプト下の領域を書き換える
    Terminal,
    /// stdout に 1 件 1 行で出す
    Text,
    /// stdout に `<br>` 区切りのまま出す
    Html,
}

/// 実行するコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Search {
        catalog_url: String,
        debounce: Duration,
        input: InputMode,
        display: DisplayMode,
    },
}
