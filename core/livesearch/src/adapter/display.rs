//! 表示領域の実装
//!
//! - TerminalDisplay: プロンプト行の下を描き直す（raw モード前提で \r\n を使う）
//! - PlainDisplay: 任意の Write へ書く（テキスト 1 件 1 行 / `<br>` のまま）

use crate::ports::outbound::DisplaySink;
use crate::usecase::SEPARATOR;
use common::error::Error;
use std::io::Write;

/// プロンプト行の下の領域
pub struct TerminalDisplay {
    max_lines: usize,
    max_cols: usize,
}

impl TerminalDisplay {
    pub fn new(max_lines: usize, max_cols: usize) -> Self {
        Self {
            max_lines: max_lines.max(1),
            max_cols: max_cols.max(1),
        }
    }

    /// stdout の端末サイズから表示できる行数を決める（タイトル・プロンプト・余白の 3 行を除く）
    #[cfg(unix)]
    pub fn for_stdout() -> Self {
        let (rows, cols) = super::terminal::window_size(libc::STDOUT_FILENO);
        Self::new((rows as usize).saturating_sub(3), cols as usize)
    }

    /// カーソル位置を保存し、下の領域を消して書き、カーソルを戻す
    pub fn frame(&self, content: &str) -> String {
        let mut out = String::from("\x1b7\r\n\x1b[J");
        if !content.is_empty() {
            let names: Vec<&str> = content.split(SEPARATOR).collect();
            // 入りきらないときは最終行を省略表示に使う
            let visible = if names.len() > self.max_lines {
                self.max_lines - 1
            } else {
                names.len()
            };
            let mut lines: Vec<String> = names
                .iter()
                .take(visible)
                .map(|n| n.chars().take(self.max_cols).collect())
                .collect();
            if visible < names.len() {
                lines.push(format!("\x1b[2m... {} more\x1b[0m", names.len() - visible));
            }
            out.push_str(&lines.join("\r\n"));
        }
        out.push_str("\x1b8");
        out
    }
}

impl DisplaySink for TerminalDisplay {
    fn replace_content(&mut self, content: &str) -> Result<(), Error> {
        let frame = self.frame(content);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Write への素朴な出力
pub struct PlainDisplay<W: Write + Send> {
    out: W,
    html: bool,
}

impl<W: Write + Send> PlainDisplay<W> {
    pub fn new(out: W, html: bool) -> Self {
        Self { out, html }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl PlainDisplay<std::io::Stdout> {
    pub fn stdout(html: bool) -> Self {
        Self::new(std::io::stdout(), html)
    }
}

impl<W: Write + Send> DisplaySink for PlainDisplay<W> {
    fn replace_content(&mut self, content: &str) -> Result<(), Error> {
        if self.html {
            writeln!(self.out, "{}", content)?;
        } else {
            // 1 回の描画 = 1 件 1 行 + 空行
            for name in content.split(SEPARATOR).filter(|n| !n.is_empty()) {
                writeln!(self.out, "{}", name)?;
            }
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
