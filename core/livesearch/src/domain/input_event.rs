//! 入力欄の変更通知と、そこから検索語を取り出す抽出段

use super::query::QueryString;

/// 入力欄の内容が変わったことを表す通知
///
/// `text` は通知時点の入力欄の全文。`seq` は入力元ごとの変更番号（診断用）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInputEvent {
    text: String,
    seq: u64,
}

impl RawInputEvent {
    pub fn new(text: impl Into<String>, seq: u64) -> Self {
        Self {
            text: text.into(),
            seq,
        }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn current_text(&self) -> &str {
        &self.text
    }
}

/// 通知から検索語を取り出す（副作用なし）
pub fn extract_query(event: &RawInputEvent) -> QueryString {
    QueryString::new(event.current_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_query_keeps_text_verbatim() {
        let ev = RawInputEvent::new("  Big Dog ", 3);
        assert_eq!(extract_query(&ev).as_str(), "  Big Dog ");
        assert_eq!(ev.seq(), 3);
    }

    #[test]
    fn test_extract_query_empty() {
        let ev = RawInputEvent::new("", 1);
        assert_eq!(extract_query(&ev), QueryString::default());
    }
}
