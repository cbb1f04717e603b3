//! Renderer: 結果集合を表示名の `<br>` 区切りにして表示領域を置き換える

use crate::ports::outbound::DisplaySink;
use common::domain::ResultSet;
use common::error::Error;

/// 表示名の区切り
pub const SEPARATOR: &str = "<br>";

/// API の順序のまま表示名を連結する（末尾に区切りは付けない）
pub fn render(results: &ResultSet) -> String {
    results.names().collect::<Vec<_>>().join(SEPARATOR)
}

/// 表示領域の唯一の書き手
pub struct Renderer {
    sink: Box<dyn DisplaySink>,
}

impl Renderer {
    pub fn new(sink: Box<dyn DisplaySink>) -> Self {
        Self { sink }
    }

    /// 描画して表示領域を置き換え、書き込んだ内容を返す
    pub fn show(&mut self, results: &ResultSet) -> Result<String, Error> {
        let content = render(results);
        self.sink.replace_content(&content)?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct VecSink(Arc<Mutex<Vec<String>>>);

    impl DisplaySink for VecSink {
        fn replace_content(&mut self, content: &str) -> Result<(), Error> {
            self.0.lock().unwrap().push(content.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_render_joins_with_br() {
        let rs = ResultSet::from_names(["Desperados", "Heineken"]);
        assert_eq!(render(&rs), "Desperados<br>Heineken");
    }

    #[test]
    fn test_render_single_and_empty() {
        assert_eq!(render(&ResultSet::from_names(["Affligem"])), "Affligem");
        assert_eq!(render(&ResultSet::default()), "");
    }

    #[test]
    fn test_renderer_replaces_sink_content() {
        let out = Arc::new(Mutex::new(Vec::new()));
        let mut renderer = Renderer::new(Box::new(VecSink(Arc::clone(&out))));

        renderer.show(&ResultSet::from_names(["a", "b"])).unwrap();
        renderer.show(&ResultSet::default()).unwrap();

        assert_eq!(*out.lock().unwrap(), vec!["a<br>b".to_string(), String::new()]);
    }
}
