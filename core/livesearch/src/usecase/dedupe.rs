//! Deduplicator: 直前に通した値と同じ値を捨てる（distinct-until-changed）

use crate::domain::QueryString;

#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    last: Option<QueryString>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直前に通した値と異なれば通して記憶する。同じなら None。
    pub fn admit(&mut self, value: QueryString) -> Option<QueryString> {
        if self.last.as_ref() == Some(&value) {
            return None;
        }
        self.last = Some(value.clone());
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_duplicates_dropped() {
        let mut d = Deduplicator::new();
        let forwarded: Vec<String> = ["ale", "ale", "ale", "ipa", "ipa"]
            .iter()
            .filter_map(|s| d.admit(QueryString::from(*s)))
            .map(|q| q.to_string())
            .collect();
        assert_eq!(forwarded, vec!["ale", "ipa"]);
    }

    #[test]
    fn test_value_can_return_after_a_different_one() {
        let mut d = Deduplicator::new();
        assert!(d.admit(QueryString::from("ale")).is_some());
        assert!(d.admit(QueryString::from("ipa")).is_some());
        assert!(d.admit(QueryString::from("ale")).is_some());
        assert_eq!(d.admit(QueryString::from("ale")), None);
    }

    #[test]
    fn test_first_empty_value_is_forwarded() {
        let mut d = Deduplicator::new();
        assert_eq!(d.admit(QueryString::from("")), Some(QueryString::from("")));
        assert_eq!(d.admit(QueryString::from("")), None);
    }

    #[test]
    fn test_exact_equality_only() {
        let mut d = Deduplicator::new();
        assert!(d.admit(QueryString::from("Ale")).is_some());
        assert!(d.admit(QueryString::from("ale")).is_some());
        assert!(d.admit(QueryString::from("ale ")).is_some());
    }
}
