//! Outbound ポート: アプリが外界（入力欄・表示領域）を使うための trait
//!
//! 時刻・ログ・カタログ API のポートは common::ports::outbound にある。

pub mod display_sink;
pub mod input_source;

pub use display_sink::DisplaySink;
pub use input_source::{InputListener, InputNotice, InputSource, Subscription};
