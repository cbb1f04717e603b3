//! カタログのレコードと結果集合

use serde::{Deserialize, Serialize};

/// カタログの 1 レコード。`name` 以外のフィールドは読み捨てる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// API が返した順序のままのレコード列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet(Vec<Record>);

impl ResultSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self(records)
    }

    /// 表示名だけの列から組み立てる
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Record::new).collect())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|r| r.name.as_str())
    }
}

impl std::ops::Deref for ResultSet {
    type Target = [Record];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Record>> for ResultSet {
    fn from(records: Vec<Record>) -> Self {
        Self(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ignores_extra_fields() {
        let json = r#"{"id":"b-1","name":"Big Dog Brewing","city":"Las Vegas","phone":null}"#;
        let rec: Record = serde_json::from_str(json).unwrap();
        assert_eq!(rec.name, "Big Dog Brewing");
    }

    #[test]
    fn test_record_requires_name() {
        let json = r#"{"id":"b-1"}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn test_result_set_keeps_order() {
        let rs = ResultSet::from_names(["Heineken", "Desperados", "Affligem"]);
        let names: Vec<&str> = rs.names().collect();
        assert_eq!(names, vec!["Heineken", "Desperados", "Affligem"]);
        assert_eq!(rs.len(), 3);
    }
}
