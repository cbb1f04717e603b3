//! キー入力を 1 行の入力欄として扱う入力元
//!
//! TTY を raw モードにし、1 バイトずつ LineEditor に通す。
//! 内容が実際に変わったときだけ通知する（カーソル移動などは通知しない）。

#[cfg(unix)]
use crate::domain::RawInputEvent;
#[cfg(unix)]
use crate::ports::outbound::{InputListener, InputNotice, InputSource, Subscription};
#[cfg(unix)]
use common::error::Error;
#[cfg(unix)]
use std::io::Write;
#[cfg(unix)]
use std::os::unix::io::RawFd;
#[cfg(unix)]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(unix)]
use std::sync::Arc;
#[cfg(unix)]
use std::thread;

/// 1 バイト入力の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Changed,
    Unchanged,
    /// Ctrl-C / Ctrl-D: 入力欄を抜ける
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    Esc,
    Csi,
}

/// 1 行分の編集バッファ
#[derive(Debug, Clone)]
pub struct LineEditor {
    text: String,
    utf8: Vec<u8>,
    escape: Escape,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEditor {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            utf8: Vec::new(),
            escape: Escape::None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn feed(&mut self, byte: u8) -> KeyOutcome {
        match self.escape {
            Escape::Esc => {
                self.escape = if byte == b'[' || byte == b'O' {
                    Escape::Csi
                } else {
                    Escape::None
                };
                return KeyOutcome::Unchanged;
            }
            Escape::Csi => {
                // パラメータ・中間バイトを読み飛ばし、終端バイトで抜ける
                if (0x40..=0x7e).contains(&byte) {
                    self.escape = Escape::None;
                }
                return KeyOutcome::Unchanged;
            }
            Escape::None => {}
        }

        match byte {
            0x1b => {
                self.escape = Escape::Esc;
                KeyOutcome::Unchanged
            }
            0x03 | 0x04 => KeyOutcome::Abort,
            0x7f | 0x08 => changed_if(self.text.pop().is_some()),
            // Ctrl-U
            0x15 => {
                let had = !self.text.is_empty();
                self.text.clear();
                changed_if(had)
            }
            // Ctrl-W
            0x17 => {
                let before = self.text.len();
                let trimmed = self.text.trim_end().len();
                self.text.truncate(trimmed);
                let cut = self
                    .text
                    .rfind(char::is_whitespace)
                    .map(|i| i + self.text[i..].chars().next().map_or(1, char::len_utf8))
                    .unwrap_or(0);
                self.text.truncate(cut);
                changed_if(self.text.len() != before)
            }
            b if b < 0x20 => KeyOutcome::Unchanged,
            b => self.feed_utf8(b),
        }
    }

    fn feed_utf8(&mut self, byte: u8) -> KeyOutcome {
        self.utf8.push(byte);
        match std::str::from_utf8(&self.utf8) {
            Ok(s) => {
                self.text.push_str(s);
                self.utf8.clear();
                KeyOutcome::Changed
            }
            // 多バイト文字の途中
            Err(e) if e.error_len().is_none() && self.utf8.len() < 4 => KeyOutcome::Unchanged,
            Err(_) => {
                self.utf8.clear();
                KeyOutcome::Unchanged
            }
        }
    }
}

fn changed_if(changed: bool) -> KeyOutcome {
    if changed {
        KeyOutcome::Changed
    } else {
        KeyOutcome::Unchanged
    }
}

/// raw モードの TTY を入力欄とする InputSource
#[cfg(unix)]
pub struct KeystrokeInputSource {
    fd: RawFd,
    prompt: String,
    placeholder: String,
}

#[cfg(unix)]
impl KeystrokeInputSource {
    /// 読み取りが止まっているか確認する間隔
    const POLL_INTERVAL_MS: i32 = 100;

    pub fn new(fd: RawFd, prompt: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            fd,
            prompt: prompt.into(),
            placeholder: placeholder.into(),
        }
    }

    /// stdin を入力欄にする
    pub fn stdin(placeholder: impl Into<String>) -> Self {
        Self::new(libc::STDIN_FILENO, "> ", placeholder)
    }
}

/// プロンプト行を描き直すエスケープ列
#[cfg(unix)]
fn prompt_line(prompt: &str, placeholder: &str, text: &str) -> String {
    if text.is_empty() && !placeholder.is_empty() {
        let back = prompt.chars().count();
        format!("\r\x1b[K{}\x1b[2m{}\x1b[0m\r\x1b[{}C", prompt, placeholder, back)
    } else {
        format!("\r\x1b[K{}{}", prompt, text)
    }
}

#[cfg(unix)]
fn echo(line: &str) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let _ = out.write_all(line.as_bytes());
    let _ = out.flush();
}

#[cfg(unix)]
impl InputSource for KeystrokeInputSource {
    fn subscribe(&mut self, mut listener: InputListener) -> Result<Subscription, Error> {
        use super::terminal::{is_tty, read_fd, wait_readable, TermMode};

        if !is_tty(self.fd) {
            return Err(Error::setup("input is not a terminal (use --lines for piped input)"));
        }
        let guard = TermMode::set_raw(self.fd)
            .map_err(|e| Error::setup(format!("Failed to enter raw mode: {}", e)))?;

        let active = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&active);
        let fd = self.fd;
        let prompt = self.prompt.clone();
        let placeholder = self.placeholder.clone();
        echo(&prompt_line(&prompt, &placeholder, ""));

        thread::Builder::new()
            .name("livesearch-keys".to_string())
            .spawn(move || {
                let mut editor = LineEditor::new();
                let mut seq = 0u64;
                let mut buf = [0u8; 64];
                while flag.load(Ordering::SeqCst) {
                    match wait_readable(fd, Self::POLL_INTERVAL_MS) {
                        Ok(false) => continue,
                        Ok(true) => {}
                        Err(_) => break,
                    }
                    let n = match read_fd(fd, &mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => n,
                    };
                    for &b in &buf[..n] {
                        match editor.feed(b) {
                            KeyOutcome::Unchanged => {}
                            KeyOutcome::Changed => {
                                echo(&prompt_line(&prompt, &placeholder, editor.text()));
                                seq += 1;
                                if flag.load(Ordering::SeqCst) {
                                    listener(InputNotice::Changed(RawInputEvent::new(
                                        editor.text(),
                                        seq,
                                    )));
                                }
                            }
                            KeyOutcome::Abort => {
                                if flag.load(Ordering::SeqCst) {
                                    listener(InputNotice::Aborted);
                                }
                                return;
                            }
                        }
                    }
                }
                if flag.load(Ordering::SeqCst) {
                    listener(InputNotice::Closed);
                }
            })
            .map_err(|e| Error::setup(format!("Failed to spawn input reader: {}", e)))?;

        Ok(Subscription::new(active).with_resource(guard))
    }
}
