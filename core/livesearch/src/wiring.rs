//! 配線: 標準アダプタで UseCase を組み立てる

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use common::adapter::{FileJsonLog, HttpCatalogClient, NoopLog, StdClock, StdEnvResolver, StderrLog};
use common::error::Error;
use common::ports::outbound::{CatalogClient, Clock, EnvResolver, Log, LogLevel};

use crate::adapter::{LineInputSource, PlainDisplay, TerminalDisplay};
use crate::domain::command::{DisplayMode, InputMode};
use crate::ports::outbound::{DisplaySink, InputSource};
use crate::usecase::{LiveSearchUseCase, PipelineSettings};

/// 入力欄が空のときに見せる例
pub const PLACEHOLDER: &str = "eg. Big";

/// 配線で組み立てたポート群（main の Command ディスパッチで利用）
pub struct App {
    pub env_resolver: Arc<dyn EnvResolver>,
    pub clock: Arc<dyn Clock>,
    /// 構造化ログ（ファイルへ JSONL / -v で stderr）。検索結果の表示とは別。
    pub logger: Arc<dyn Log>,
}

/// ログの出力先を決める。ファイル指定が最優先、次に -v の stderr、どちらも無ければ出さない。
pub fn build_logger(log_file: Option<PathBuf>, verbose: bool) -> Arc<dyn Log> {
    match (log_file, verbose) {
        (Some(path), _) => Arc::new(FileJsonLog::new(path)),
        (None, true) => Arc::new(StderrLog::new(LogLevel::Debug)),
        (None, false) => Arc::new(NoopLog),
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_livesearch(log_file: Option<PathBuf>, verbose: bool) -> App {
    App {
        env_resolver: Arc::new(StdEnvResolver),
        clock: Arc::new(StdClock::new()),
        logger: build_logger(log_file, verbose),
    }
}

/// カタログ URL と静止時間から LiveSearchUseCase を組み立てる。URL が不正なら Err。
pub fn build_live_search(
    app: &App,
    catalog_url: &str,
    debounce: Duration,
) -> Result<LiveSearchUseCase, Error> {
    let client: Arc<dyn CatalogClient> = Arc::new(HttpCatalogClient::new(catalog_url)?);
    Ok(LiveSearchUseCase::new(
        client,
        Arc::clone(&app.clock),
        Arc::clone(&app.logger),
        PipelineSettings { debounce },
    ))
}

/// 入力元を開く
pub fn open_input(mode: InputMode) -> Result<Box<dyn InputSource>, Error> {
    match mode {
        InputMode::Lines => Ok(Box::new(LineInputSource::stdin())),
        #[cfg(unix)]
        InputMode::Keystroke => Ok(Box::new(crate::adapter::KeystrokeInputSource::stdin(
            PLACEHOLDER,
        ))),
        #[cfg(not(unix))]
        InputMode::Keystroke => Err(Error::setup(
            "keystroke input requires a Unix terminal (use --lines)",
        )),
    }
}

/// 表示先を開く
pub fn open_display(mode: DisplayMode) -> Box<dyn DisplaySink> {
    match mode {
        #[cfg(unix)]
        DisplayMode::Terminal => Box::new(TerminalDisplay::for_stdout()),
        #[cfg(not(unix))]
        DisplayMode::Terminal => Box::new(TerminalDisplay::new(20, 80)),
        DisplayMode::Text => Box::new(PlainDisplay::stdout(false)),
        DisplayMode::Html => Box::new(PlainDisplay::stdout(true)),
    }
}

/// 標準入力が端末か
pub fn stdin_is_tty() -> bool {
    #[cfg(unix)]
    {
        crate::adapter::terminal::is_tty(libc::STDIN_FILENO)
    }
    #[cfg(not(unix))]
    {
        false
    }
}
