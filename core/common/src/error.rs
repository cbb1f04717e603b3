//! エラーハンドリング
//!
//! 全レイヤー共通の Error 型。終了コードは sysexits.h に合わせる。

use thiserror::Error as ThisError;

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// 引数・設定値の不正（EX_USAGE）
    #[error("{0}")]
    InvalidArgs(String),
    /// ファイル・端末 I/O の失敗（EX_IOERR）
    #[error("I/O error: {0}")]
    Io(String),
    /// HTTP 通信の失敗・非 2xx ステータス（EX_UNAVAILABLE）
    #[error("HTTP error: {0}")]
    Http(String),
    /// レスポンス本文が期待した JSON でない（EX_DATAERR）
    #[error("JSON error: {0}")]
    Json(String),
    /// パイプラインを組み立てられない（入力元・表示先が無い等）
    #[error("setup failed: {0}")]
    Setup(String),
    /// その他の内部エラー（EX_SOFTWARE）
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgs(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn setup(msg: impl Into<String>) -> Self {
        Error::Setup(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Error::System(msg.into())
    }

    /// プロセスの終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgs(_) => 64,
            Error::Json(_) => 65,
            Error::Http(_) => 69,
            Error::Setup(_) | Error::System(_) => 70,
            Error::Io(_) => 74,
        }
    }

    /// 使い方の表示が役に立つエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgs(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e.to_string())
    }
}
