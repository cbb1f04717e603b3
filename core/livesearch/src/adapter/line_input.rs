//! 行単位の入力元（パイプ入力・--lines）
//!
//! 1 行 = その時点の入力欄の全文。EOF で Closed を通知する。

use crate::domain::RawInputEvent;
use crate::ports::outbound::{InputListener, InputNotice, InputSource, Subscription};
use common::error::Error;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

pub struct LineInputSource<R: BufRead + Send + 'static> {
    reader: Option<R>,
}

impl<R: BufRead + Send + 'static> LineInputSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

impl LineInputSource<std::io::BufReader<std::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(std::io::BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead + Send + 'static> InputSource for LineInputSource<R> {
    fn subscribe(&mut self, mut listener: InputListener) -> Result<Subscription, Error> {
        let reader = self
            .reader
            .take()
            .ok_or_else(|| Error::setup("line input can only be subscribed once"))?;
        let active = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&active);

        thread::Builder::new()
            .name("livesearch-lines".to_string())
            .spawn(move || {
                let mut seq = 0u64;
                for line in reader.lines() {
                    // 読み取りエラーは EOF と同じく入力終了として扱う
                    let Ok(line) = line else { break };
                    if !flag.load(Ordering::SeqCst) {
                        return;
                    }
                    seq += 1;
                    let text = line.strip_suffix('\r').unwrap_or(&line);
                    listener(InputNotice::Changed(RawInputEvent::new(text, seq)));
                }
                if flag.load(Ordering::SeqCst) {
                    listener(InputNotice::Closed);
                }
            })
            .map_err(|e| Error::setup(format!("Failed to spawn input reader: {}", e)))?;

        Ok(Subscription::new(active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;
    use std::time::Duration;

    fn collect(input: &str) -> Vec<InputNotice> {
        let mut source = LineInputSource::new(Cursor::new(input.as_bytes().to_vec()));
        let (tx, rx) = mpsc::channel();
        let _sub = source
            .subscribe(Box::new(move |n| {
                let _ = tx.send(n);
            }))
            .unwrap();
        let mut out = Vec::new();
        while let Ok(n) = rx.recv_timeout(Duration::from_secs(5)) {
            let closed = n == InputNotice::Closed;
            out.push(n);
            if closed {
                break;
            }
        }
        out
    }

    #[test]
    fn test_each_line_is_an_event_then_closed() {
        let notices = collect("a\nab\r\n\nipa\n");
        assert_eq!(
            notices,
            vec![
                InputNotice::Changed(RawInputEvent::new("a", 1)),
                InputNotice::Changed(RawInputEvent::new("ab", 2)),
                InputNotice::Changed(RawInputEvent::new("", 3)),
                InputNotice::Changed(RawInputEvent::new("ipa", 4)),
                InputNotice::Closed,
            ]
        );
    }

    #[test]
    fn test_empty_input_only_closes() {
        assert_eq!(collect(""), vec![InputNotice::Closed]);
    }

    #[test]
    fn test_second_subscribe_fails() {
        let mut source = LineInputSource::new(Cursor::new(Vec::new()));
        let _first = source.subscribe(Box::new(|_| {})).unwrap();
        let err = source.subscribe(Box::new(|_| {})).err().unwrap();
        assert_eq!(err.exit_code(), 70);
    }
}
