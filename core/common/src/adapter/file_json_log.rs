//! Log の標準実装
//!
//! - FileJsonLog: ファイルへ JSONL で追記
//! - StderrLog: -v 指定時に stderr へ 1 行ずつ
//! - NoopLog: 何もしない（既定・テスト用）

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    path: PathBuf,
    /// 複数スレッドからの追記が行単位で混ざらないようにする
    lock: Mutex<()>,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::system("log lock poisoned"))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut w = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }
}

/// stderr へ要点だけを出す Log 実装（-v / --verbose）
#[derive(Debug, Clone)]
pub struct StderrLog {
    min_level: LogLevel,
}

impl StderrLog {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        severity(level) <= severity(self.min_level)
    }
}

fn severity(level: LogLevel) -> u8 {
    match level {
        LogLevel::Error => 0,
        LogLevel::Warn => 1,
        LogLevel::Info => 2,
        LogLevel::Debug => 3,
    }
}

/// stderr 用の 1 行表現
pub fn format_human(record: &LogRecord) -> String {
    let mut line = format!("[livesearch] {} {}", record.level.as_str(), record.message);
    if let Some(kind) = &record.kind {
        line.push_str(&format!(" ({})", kind));
    }
    if let Some(fields) = &record.fields {
        for (k, v) in fields {
            line.push_str(&format!(" {}={}", k, v));
        }
    }
    line
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if self.enabled(record.level) {
            // raw モードの端末でも行頭から始まるよう \r を付ける
            eprint!("{}\r\n", format_human(record));
        }
        Ok(())
    }
}

/// 何も出力しない Log 実装（既定・テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::now_iso8601;

    #[test]
    fn test_noop_log() {
        let log = NoopLog;
        let rec = LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "test".to_string(),
            layer: None,
            kind: None,
            fields: None,
        };
        assert!(log.log(&rec).is_ok());
    }

    #[test]
    fn test_file_json_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/livesearch.jsonl");
        let log = FileJsonLog::new(&path);

        log.log(&LogRecord::new(LogLevel::Info, "command started").kind("lifecycle"))
            .unwrap();
        log.log(&LogRecord::new(LogLevel::Warn, "fetch failed").kind("fetch"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["message"], "command started");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level"], "warn");
    }

    #[test]
    fn test_stderr_log_level_filter() {
        let log = StderrLog::new(LogLevel::Info);
        assert!(log.enabled(LogLevel::Error));
        assert!(log.enabled(LogLevel::Info));
        assert!(!log.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_format_human() {
        let rec = LogRecord::new(LogLevel::Debug, "fetch started")
            .kind("fetch")
            .field("query", serde_json::json!("ale"));
        assert_eq!(
            format_human(&rec),
            "[livesearch] debug fetch started (fetch) query=\"ale\""
        );
    }
}
