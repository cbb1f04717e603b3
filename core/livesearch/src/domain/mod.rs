//! livesearch 固有のドメイン型（型と不変条件）

pub mod command;
pub mod input_event;
pub mod query;

pub use command::Command;
pub use input_event::{extract_query, RawInputEvent};
pub use query::QueryString;
