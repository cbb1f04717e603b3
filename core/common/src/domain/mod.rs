//! ドメイン型（Newtype）
//!
//! カタログ API の応答を意味のある型に包んで境界を明確にする。

pub mod record;

pub use record::{Record, ResultSet};
